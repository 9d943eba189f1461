//! Generate-and-download panel.

use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdDownload, LdLoaderCircle};
use postcraft_core::Node;
use postcraft_export::{CaptureMode, ExportConfig};

use crate::capture::{GeneratedImage, capture};
use crate::download;
use crate::gate::ExportGate;

/// Props for the [`ImageGenerator`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImageGeneratorProps {
    /// The card as currently rendered.
    tree: Node,
    mode: CaptureMode,
    #[props(default)]
    config: ExportConfig,
}

/// Button that captures the card, with the result and a download button
/// underneath.
///
/// A failed capture is logged to the console and keeps the previous
/// result on screen.
#[component]
pub fn ImageGenerator(props: ImageGeneratorProps) -> Element {
    let mut gate = use_signal(ExportGate::default);
    let mut generated = use_signal(|| Option::<Rc<GeneratedImage>>::None);
    let mut download_error = use_signal(|| Option::<String>::None);
    let busy = gate.read().is_busy();

    let generate = {
        let tree = props.tree.clone();
        let mode = props.mode;
        let config = props.config.clone();
        move |_| {
            if !gate.write().try_begin() {
                return;
            }
            let tree = tree.clone();
            let config = config.clone();
            spawn(async move {
                match capture(tree, mode, config).await {
                    Ok(image) => {
                        download_error.set(None);
                        generated.set(Some(Rc::new(image)));
                    }
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("postcraft: error generating image: {e}").into(),
                        );
                    }
                }
                gate.write().finish();
            });
        }
    };

    let save = move |_| {
        let Some(image) = generated() else {
            return;
        };
        match download::trigger_download(&image.png, &image.filename, "image/png") {
            Ok(()) => download_error.set(None),
            Err(e) => download_error.set(Some(format!("Download failed: {e}"))),
        }
    };

    rsx! {
        div { class: "bg-white rounded-lg shadow-md p-6",
            h2 { class: "text-xl font-semibold text-gray-800 mb-4", "Generate Image" }

            div { class: "space-y-4",
                button {
                    class: "w-full py-2 px-4 bg-blue-600 hover:bg-blue-700 text-white font-medium rounded-md transition focus:outline-none focus:ring-2 focus:ring-blue-500 focus:ring-opacity-50 disabled:opacity-50 disabled:cursor-not-allowed flex items-center justify-center",
                    disabled: busy,
                    onclick: generate,
                    if busy {
                        Icon { width: 20, height: 20, class: "w-5 h-5 mr-2 animate-spin", icon: LdLoaderCircle }
                        "Generating..."
                    } else {
                        "Generate Image"
                    }
                }

                if let Some(image) = generated() {
                    div { class: "space-y-4",
                        div { class: "border border-gray-200 rounded-md overflow-hidden",
                            img {
                                src: "{image.data_url}",
                                alt: "Generated LinkedIn Post",
                                class: "w-full",
                            }
                        }

                        button {
                            class: "w-full py-2 px-4 bg-green-600 hover:bg-green-700 text-white font-medium rounded-md transition focus:outline-none focus:ring-2 focus:ring-green-500 focus:ring-opacity-50 flex items-center justify-center",
                            onclick: save,
                            Icon { width: 20, height: 20, class: "w-5 h-5 mr-2", icon: LdDownload }
                            "Download PNG"
                        }

                        if let Some(err) = download_error() {
                            p { class: "text-sm text-red-600", "{err}" }
                        }
                    }
                }
            }
        }
    }
}
