//! Editor form for the post record.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdCircleAlert, LdUpload, LdX};
use postcraft_core::{
    CountField, ImageField, PostPatch, TextField, parse_count, profile_picture_from_url,
};

use crate::file::read_image_upload;
use crate::store::PostStore;

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500";
const LABEL_CLASS: &str = "block text-sm font-medium text-gray-700 mb-1";

/// Props for the [`EditorForm`] component.
#[derive(Props, Clone, PartialEq)]
pub struct EditorFormProps {
    store: PostStore,
}

/// Read the first selected file into `field` and hand the patch to the
/// store.  Errors land in `error`.
async fn upload_first(
    files: Vec<FileData>,
    mut error: Signal<Option<String>>,
    mut store: PostStore,
    field: ImageField,
) {
    error.set(None);
    let Some(file) = files.first() else {
        return;
    };
    match read_image_upload(file, field).await {
        Ok(patch) => store.update(patch),
        Err(e) => error.set(Some(e.to_string())),
    }
}

/// Inline error under a field.
#[component]
fn FieldError(message: String) -> Element {
    rsx! {
        p { class: "flex items-center text-sm text-red-600",
            Icon { width: 16, height: 16, class: "w-4 h-4 mr-1", icon: LdCircleAlert }
            "{message}"
        }
    }
}

/// Every editable field of the post, writing straight to the store.
///
/// Text and counter fields patch the record on each keystroke.  Image
/// inputs are validated first; a rejected URL or file shows an error
/// under its own field and leaves the record alone.
#[component]
pub fn EditorForm(props: EditorFormProps) -> Element {
    let mut store = props.store;
    let record = store.record();
    let profile_error = use_signal(|| Option::<String>::None);
    let post_image_error = use_signal(|| Option::<String>::None);

    let text_input = move |field: TextField| {
        move |evt: FormEvent| {
            let mut store = store;
            store.update(field.patch(evt.value()));
        }
    };

    let on_profile_url = move |evt: FormEvent| {
        let mut profile_error = profile_error;
        match profile_picture_from_url(&evt.value()) {
            Ok(patch) => {
                profile_error.set(None);
                store.update(patch);
            }
            Err(e) => profile_error.set(Some(e.to_string())),
        }
    };

    let on_profile_file = move |evt: FormEvent| async move {
        upload_first(evt.files(), profile_error, store, ImageField::ProfilePicture).await;
    };

    let on_post_image_file = move |evt: FormEvent| async move {
        upload_first(evt.files(), post_image_error, store, ImageField::PostImage).await;
    };

    rsx! {
        div { class: "bg-white rounded-lg shadow-md p-6 space-y-6",
            h2 { class: "text-xl font-semibold text-gray-800 mb-4", "LinkedIn Post Details" }

            div { class: "space-y-4",
                div {
                    label { r#for: "fullName", class: LABEL_CLASS, "Full Name" }
                    input {
                        r#type: "text",
                        id: "fullName",
                        class: INPUT_CLASS,
                        placeholder: "John Doe",
                        value: "{record.full_name}",
                        oninput: text_input(TextField::FullName),
                    }
                }

                div {
                    label { r#for: "profilePicture", class: LABEL_CLASS, "Profile Picture" }
                    div { class: "space-y-2",
                        input {
                            r#type: "text",
                            id: "profilePicture",
                            class: INPUT_CLASS,
                            placeholder: "https://example.com/profile.jpg",
                            oninput: on_profile_url,
                        }
                        div { class: "flex items-center",
                            span { class: "text-sm text-gray-500 mr-2", "Or upload:" }
                            label { class: "flex items-center px-4 py-2 bg-gray-100 text-gray-700 rounded cursor-pointer hover:bg-gray-200 transition",
                                Icon { width: 16, height: 16, class: "w-4 h-4 mr-2", icon: LdUpload }
                                span { class: "text-sm", "Choose file" }
                                input {
                                    r#type: "file",
                                    accept: "image/*",
                                    class: "hidden",
                                    onchange: on_profile_file,
                                }
                            }
                        }
                        if let Some(message) = profile_error() {
                            FieldError { message }
                        }
                    }
                }

                div { class: "grid grid-cols-2 gap-4",
                    div {
                        label { r#for: "position", class: LABEL_CLASS, "Position" }
                        input {
                            r#type: "text",
                            id: "position",
                            class: INPUT_CLASS,
                            placeholder: "CEO at Company",
                            value: "{record.position}",
                            oninput: text_input(TextField::Position),
                        }
                    }
                    div {
                        label { r#for: "postTime", class: LABEL_CLASS, "Post Time" }
                        input {
                            r#type: "text",
                            id: "postTime",
                            class: INPUT_CLASS,
                            placeholder: "2h • ✍️",
                            value: "{record.post_time}",
                            oninput: text_input(TextField::PostTime),
                        }
                    }
                }

                div {
                    label { r#for: "postContent", class: LABEL_CLASS, "Post Content" }
                    textarea {
                        id: "postContent",
                        rows: "5",
                        class: INPUT_CLASS,
                        placeholder: "Write your LinkedIn post content here...",
                        value: "{record.post_content}",
                        oninput: text_input(TextField::PostContent),
                    }
                }

                div {
                    label { class: LABEL_CLASS, "Post Image" }
                    div { class: "space-y-2",
                        if let Some(src) = record.post_image.clone() {
                            div { class: "relative border border-gray-300 rounded-md p-2",
                                img { src, alt: "Post", class: "w-full h-40 object-cover rounded" }
                                button {
                                    class: "absolute top-4 right-4 bg-white rounded-full p-1 shadow-md hover:bg-gray-100",
                                    onclick: move |_| store.update(PostPatch::clear_post_image()),
                                    Icon { width: 20, height: 20, class: "w-5 h-5 text-gray-600", icon: LdX }
                                }
                            }
                        } else {
                            label { class: "flex flex-col items-center justify-center w-full h-32 border-2 border-gray-300 border-dashed rounded-md cursor-pointer bg-gray-50 hover:bg-gray-100 transition",
                                div { class: "flex flex-col items-center justify-center pt-5 pb-6",
                                    Icon { width: 32, height: 32, class: "w-8 h-8 text-gray-400 mb-2", icon: LdUpload }
                                    p { class: "text-sm text-gray-500", "Upload post image" }
                                }
                                input {
                                    r#type: "file",
                                    accept: "image/*",
                                    class: "hidden",
                                    onchange: on_post_image_file,
                                }
                            }
                        }
                        if let Some(message) = post_image_error() {
                            FieldError { message }
                        }
                    }
                }

                div { class: "grid grid-cols-3 gap-4",
                    for field in CountField::ALL {
                        div { key: "{field:?}",
                            label { r#for: field.id(), class: LABEL_CLASS, {field.label()} }
                            input {
                                r#type: "number",
                                id: field.id(),
                                min: "0",
                                class: INPUT_CLASS,
                                value: field.get(&record).to_string(),
                                oninput: move |evt: FormEvent| {
                                    let mut store = store;
                                    store.update(field.patch(parse_count(&evt.value())));
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}
