use api::ProfileUpdate;
use dioxus::prelude::*;
use store::User;
use ui::actions::{self, PasswordForm};
use ui::icons::FaCamera;
use ui::platform::{object_url, read_file, revoke_object_url};
use ui::validation::validate_photo;
use ui::{use_auth, use_services, use_toasts, AuthState, Avatar, Icon, PhotoCropper};

#[component]
pub fn Profile() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let mut auth = use_auth();

    let mut profile = use_signal(|| None::<User>);
    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let mut current_password = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut changing = use_signal(|| false);

    let mut crop_source = use_signal(|| None::<String>);
    let mut uploading = use_signal(|| false);

    let mut reload = use_future({
        let services = services.clone();
        move || {
            let services = services.clone();
            async move {
                match actions::load_profile(&services.client, &services.session).await {
                    Ok(user) => {
                        full_name.set(user.full_name.clone().unwrap_or_default());
                        email.set(user.email.clone());
                        profile.set(Some(user));
                        auth.set(AuthState {
                            user: services.session.current_user(),
                        });
                    }
                    Err(e) => toasts.failure(&e, "Failed to load profile"),
                }
            }
        }
    });

    let handle_update = {
        let services = services.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let services = services.clone();
            spawn(async move {
                let update = ProfileUpdate {
                    full_name: full_name().trim().to_string(),
                    email: email().trim().to_string(),
                };
                saving.set(true);
                let result = actions::update_profile(&services.client, &services.session, &update).await;
                saving.set(false);
                match result {
                    Ok(_) => {
                        toasts.success("Profile updated successfully!");
                        reload.restart();
                    }
                    Err(e) => toasts.failure(&e, "Failed to update profile"),
                }
            });
        }
    };

    let handle_password = {
        let services = services.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let services = services.clone();
            spawn(async move {
                let form = PasswordForm {
                    current: current_password(),
                    new_password: new_password(),
                    confirm: confirm_password(),
                };
                changing.set(true);
                let result =
                    actions::change_password(&services.client, &services.config.limits, &form).await;
                changing.set(false);
                match result {
                    Ok(()) => {
                        toasts.success("Password changed successfully!");
                        current_password.set(String::new());
                        new_password.set(String::new());
                        confirm_password.set(String::new());
                    }
                    Err(e) => toasts.failure(&e, "Failed to change password"),
                }
            });
        }
    };

    let max_photo_bytes = services.config.limits.max_photo_bytes;
    let choose_photo = move |evt: FormEvent| {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        let mime = file.content_type().unwrap_or_default();
        if let Err(e) = validate_photo(file.size(), &mime, max_photo_bytes) {
            toasts.error(e.to_string());
            return;
        }
        spawn(async move {
            match read_file(file).await {
                Ok(image) => match object_url(&image.bytes, &image.mime) {
                    Some(url) => crop_source.set(Some(url)),
                    None => toasts.error("Could not preview that image"),
                },
                Err(e) => {
                    tracing::error!("Failed to read photo: {e}");
                    toasts.error("Could not read that image");
                }
            }
        });
    };

    let mut close_cropper = move || {
        if let Some(url) = crop_source() {
            revoke_object_url(&url);
        }
        crop_source.set(None);
    };

    let upload = {
        let services = services.clone();
        move |jpeg: Vec<u8>| {
            let services = services.clone();
            spawn(async move {
                uploading.set(true);
                let result = actions::upload_photo(&services.client, &services.session, jpeg).await;
                uploading.set(false);
                match result {
                    Ok(url) => {
                        toasts.success("Profile photo updated!");
                        if let Some(user) = profile.write().as_mut() {
                            user.profile_photo = Some(url);
                        }
                        auth.set(AuthState {
                            user: services.session.current_user(),
                        });
                        close_cropper();
                    }
                    Err(e) => toasts.failure(&e, "Failed to upload photo"),
                }
            });
        }
    };

    let display_name = profile()
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();
    let photo = profile()
        .and_then(|u| u.profile_photo)
        .map(|p| services.client.media_url(&p));
    let photo_size = services.config.limits.photo_size;

    rsx! {
        div {
            class: "page-header",
            h1 { "Profile" }
        }
        div {
            class: "profile-grid",
            section {
                class: "card profile-photo-card",
                Avatar { name: display_name.clone(), photo, size: 128 }
                h2 { "{display_name}" }
                label {
                    class: "btn btn-outline",
                    Icon { icon: FaCamera, width: 14, height: 14 }
                    "Change photo"
                    input {
                        r#type: "file",
                        accept: "image/*",
                        class: "hidden",
                        onchange: choose_photo,
                    }
                }
            }

            section {
                class: "card",
                h3 { "Personal information" }
                form {
                    class: "stacked-form",
                    onsubmit: handle_update,
                    label {
                        class: "field",
                        span { "Full name" }
                        input {
                            r#type: "text",
                            value: full_name(),
                            oninput: move |evt: FormEvent| full_name.set(evt.value()),
                        }
                    }
                    label {
                        class: "field",
                        span { "Email" }
                        input {
                            r#type: "email",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save changes" }
                    }
                }
            }

            section {
                class: "card",
                h3 { "Change password" }
                form {
                    class: "stacked-form",
                    onsubmit: handle_password,
                    input {
                        r#type: "password",
                        placeholder: "Current password",
                        value: current_password(),
                        oninput: move |evt: FormEvent| current_password.set(evt.value()),
                    }
                    input {
                        r#type: "password",
                        placeholder: "New password",
                        value: new_password(),
                        oninput: move |evt: FormEvent| new_password.set(evt.value()),
                    }
                    input {
                        r#type: "password",
                        placeholder: "Confirm new password",
                        value: confirm_password(),
                        oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: changing(),
                        if changing() { "Updating..." } else { "Update password" }
                    }
                }
            }
        }

        if let Some(source) = crop_source() {
            PhotoCropper {
                source,
                output_size: photo_size,
                uploading: uploading(),
                on_crop: upload,
                on_cancel: move |_| close_cropper(),
                on_error: move |e: String| toasts.error(e),
            }
        }
    }
}
