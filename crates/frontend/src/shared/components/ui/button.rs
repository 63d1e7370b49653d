use crate::shared::icons::icon;
use leptos::prelude::*;

/// Toolbar / dialog button: "primary" (default), "secondary" or "danger",
/// with an optional leading icon.
#[component]
pub fn Button(
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Icon name from [`crate::shared::icons::icon`]
    #[prop(optional, into)]
    icon_name: Option<String>,
    /// Tooltip
    #[prop(optional, into)]
    title: MaybeProp<String>,
    /// Disabled state (reactive)
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
    #[prop(optional)]
    on_click: Option<Callback<leptos::ev::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("primary") {
        "secondary" => "button--secondary",
        "danger" => "button--danger",
        _ => "button--primary",
    };

    view! {
        <button
            type="button"
            class=move || format!("button {}", variant_class())
            title=move || title.get().unwrap_or_default()
            disabled=move || disabled.get().unwrap_or(false)
            on:click=move |ev| {
                if let Some(handler) = on_click {
                    handler.run(ev);
                }
            }
        >
            {icon_name.as_deref().map(icon)}
            <span class="button__label">{children()}</span>
        </button>
    }
}
