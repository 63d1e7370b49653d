use super::context::use_editor;
use super::probe::DomLayoutProbe;
use editor_core::{NodeId, PointerButton, PointerOutcome};
use leptos::ev;
use leptos::prelude::*;

/// The poster canvas. The session's markup is written into a single
/// container; one delegated listener set resolves which poster node an
/// event hit.
#[component]
pub fn Stage() -> impl IntoView {
    let editor = use_editor();
    let stage_ref = editor.stage;
    let canvas_style = editor.session.with_value(|s| {
        let canvas = &s.config().canvas;
        format!(
            "position: relative; overflow: hidden; width: {}px; height: {}px;",
            canvas.width, canvas.height
        )
    });

    // Node pressed by the last mousedown. The stage re-renders while a drag
    // runs, so the click that follows is resolved against this rather than
    // the (possibly replaced) event target.
    let pressed = StoredValue::new(None::<Option<NodeId>>);

    Effect::new(move |_| {
        editor.revision.track();
        if let Some(container) = stage_ref.get() {
            let markup = editor.session.with_value(|s| s.stage_markup());
            container.set_inner_html(&markup);
        }
    });

    let probe = move || stage_ref.get_untracked().map(|div| DomLayoutProbe::new(div.into()));

    let on_mousedown = move |ev: ev::MouseEvent| {
        let Some(probe) = probe() else { return };
        let target = probe.target_node(&ev);
        pressed.set_value(Some(target));

        let button = PointerButton::from_dom(ev.button());
        let pointer = probe.pointer(&ev);
        let outcome = editor.update(|s| s.pointer_down(target, button, pointer, &probe));
        if matches!(outcome, Some(PointerOutcome::DragStarted { .. })) {
            // keep the browser from starting a text selection
            ev.prevent_default();
        }
    };

    let on_mousemove = move |ev: ev::MouseEvent| {
        let dragging = editor.session.with_value(|s| s.drag_state().is_dragging());
        if !dragging {
            return;
        }
        let Some(probe) = probe() else { return };
        let pointer = probe.pointer(&ev);
        editor.update(|s| s.pointer_move(pointer, &probe));
    };

    let on_mouseup = move |_: ev::MouseEvent| {
        editor.update(|s| s.pointer_up());
    };

    let on_mouseleave = move |_: ev::MouseEvent| {
        editor.update(|s| s.pointer_leave());
    };

    let on_click = move |ev: ev::MouseEvent| {
        let Some(probe) = probe() else { return };
        let target = pressed
            .try_update_value(|p| p.take())
            .flatten()
            .unwrap_or_else(|| probe.target_node(&ev));
        editor.update(|s| s.click(target, &probe));
    };

    view! {
        <div class="stage-wrapper">
            <div
                class="stage"
                node_ref=stage_ref
                style=canvas_style
                on:mousedown=on_mousedown
                on:mousemove=on_mousemove
                on:mouseup=on_mouseup
                on:mouseleave=on_mouseleave
                on:click=on_click
            ></div>
        </div>
    }
}
