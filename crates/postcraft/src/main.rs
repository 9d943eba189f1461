use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdLinkedin;
use postcraft_core::{Action, PreviewOptions, PreviewVariant, render_preview};
use postcraft_export::{CaptureMode, ExportConfig};
use postcraft_io::{EditorForm, ImageGenerator, PostPreview, use_post_store};

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the post store and the preview options, renders the card once
/// per change, and hands the same tree to the on-page preview and the
/// image generator.
fn app() -> Element {
    // --- Application state ---
    let store = use_post_store();
    let mut options = use_signal(PreviewOptions::default);

    let current = options();
    let tree = render_preview(&store.record(), &current);
    let mode = CaptureMode::for_variant(current.variant);

    // --- Preview handlers ---
    let on_action = move |action: Action| match action {
        Action::ExpandContent => options.write().expanded = true,
    };

    let mut select_variant = move |variant: PreviewVariant| {
        if options.peek().variant != variant {
            options.set(PreviewOptions {
                variant,
                expanded: false,
            });
        }
    };

    // --- Layout ---
    rsx! {
        // Tailwind CSS utilities, compiled by build.rs via npx @tailwindcss/cli.
        style { dangerous_inner_html: include_str!(env!("TAILWIND_CSS_PATH")) }

        div { class: "min-h-screen bg-gray-100",
            header { class: "bg-white shadow-sm sticky top-0 z-10",
                div { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-4",
                    div { class: "flex items-center",
                        Icon { width: 32, height: 32, class: "h-8 w-8 text-[#0A66C2]", icon: LdLinkedin }
                        h1 { class: "ml-2 text-xl font-bold text-gray-900", "LinkedIn Post Generator" }
                    }
                }
            }

            main { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8",
                div { class: "grid grid-cols-1 lg:grid-cols-2 gap-8",
                    // Left column: form and generator
                    div { class: "space-y-6",
                        EditorForm { store }
                        ImageGenerator {
                            tree: tree.clone(),
                            mode,
                            config: ExportConfig::default(),
                        }
                    }

                    // Right column: variant selector and live preview
                    div { class: "flex flex-col items-center",
                        div { class: "flex items-center justify-between w-full mb-4",
                            h2 { class: "text-xl font-semibold text-gray-800 self-start", "Preview" }
                            div { class: "inline-flex rounded-md shadow-sm",
                                for variant in PreviewVariant::ALL {
                                    button {
                                        key: "{variant:?}",
                                        class: if variant == current.variant {
                                            "px-3 py-1 text-sm font-medium border border-blue-600 bg-blue-600 text-white first:rounded-l-md last:rounded-r-md"
                                        } else {
                                            "px-3 py-1 text-sm font-medium border border-gray-300 bg-white text-gray-700 hover:bg-gray-50 first:rounded-l-md last:rounded-r-md"
                                        },
                                        onclick: move |_| select_variant(variant),
                                        {variant.label()}
                                    }
                                }
                            }
                        }
                        div { class: "sticky top-28 w-full flex justify-center",
                            PostPreview { tree, on_action }
                        }
                    }
                }
            }

            footer { class: "bg-white border-t border-gray-200 mt-12",
                div { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-6",
                    p { class: "text-center text-gray-500 text-sm",
                        "LinkedIn Post Generator - Create realistic LinkedIn posts and download as images"
                    }
                }
            }
        }
    }
}
