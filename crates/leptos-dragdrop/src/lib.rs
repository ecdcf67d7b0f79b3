//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.
//!
//! Generic over the dragged key `K` and the drop target `T`. Consumers get
//! three callbacks: drag start, hover over a target, and release.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Marker for types usable as drag keys or drop targets
pub trait DndValue: Clone + PartialEq + Send + Sync + 'static {}

impl<V: Clone + PartialEq + Send + Sync + 'static> DndValue for V {}

/// DnD state signals
pub struct DndSignals<K: DndValue, T: DndValue> {
    pub dragging_id_read: ReadSignal<Option<K>>,
    pub dragging_id_write: WriteSignal<Option<K>>,
    pub drop_target_read: ReadSignal<Option<T>>,
    pub drop_target_write: WriteSignal<Option<T>>,
    /// Briefly true after a drag so the trailing click can be ignored
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<K>>,
    pub pending_id_write: WriteSignal<Option<K>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
    /// Last pointer position while dragging, for overlays
    pub pointer_read: ReadSignal<(i32, i32)>,
    pub pointer_write: WriteSignal<(i32, i32)>,
}

impl<K: DndValue, T: DndValue> Clone for DndSignals<K, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: DndValue, T: DndValue> Copy for DndSignals<K, T> {}

impl<K: DndValue, T: DndValue> DndSignals<K, T> {
    pub fn is_dragging(&self) -> bool {
        self.dragging_id_read.with(Option::is_some)
    }

    /// Tracked: is `key` the item being dragged
    pub fn is_dragged(&self, key: &K) -> bool {
        self.dragging_id_read.with(|dragging| dragging.as_ref() == Some(key))
    }

    /// Tracked: is `target` the current drop target
    pub fn is_target(&self, target: &T) -> bool {
        self.drop_target_read.with(|current| current.as_ref() == Some(target))
    }
}

/// Consumer callbacks for the three drag phases
pub struct DragHandlers<K: DndValue, T: DndValue> {
    pub on_start: Option<Callback<K>>,
    pub on_over: Option<Callback<(K, T)>>,
    /// Fired for every drag that actually started; target is `None` when
    /// released outside any target
    pub on_end: Option<Callback<(K, Option<T>)>>,
}

impl<K: DndValue, T: DndValue> Clone for DragHandlers<K, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: DndValue, T: DndValue> Copy for DragHandlers<K, T> {}

impl<K: DndValue, T: DndValue> Default for DragHandlers<K, T> {
    fn default() -> Self {
        Self { on_start: None, on_over: None, on_end: None }
    }
}

pub fn create_dnd_signals<K: DndValue, T: DndValue>() -> DndSignals<K, T> {
    let (dragging_id_read, dragging_id_write) = signal(None::<K>);
    let (drop_target_read, drop_target_write) = signal(None::<T>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<K>);
    let (start_read, start_write) = signal((0i32, 0i32));
    let (pointer_read, pointer_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
        pointer_read,
        pointer_write,
    }
}

/// Has the pointer moved far enough from the press point to count as a drag
pub fn exceeds_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    let dx = (now.0 - start.0).abs();
    let dy = (now.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// What a release means: nothing unless a drag actually started
pub fn release_outcome<K: Clone, T: Clone>(dragging: Option<K>, target: Option<T>) -> Option<(K, Option<T>)> {
    dragging.map(|key| (key, target))
}

/// End drag operation
pub fn end_drag<K: DndValue, T: DndValue>(dnd: &DndSignals<K, T>) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || clear.set(false));
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), 100);
    }
}

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown<K: DndValue, T: DndValue>(dnd: DndSignals<K, T>, key: K) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore if target is input or button
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() {
                return;
            }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() {
                return;
            }
        }
        dnd.pending_id_write.set(Some(key.clone()));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Create mouseenter handler for drop targets
pub fn make_on_target_mouseenter<K: DndValue, T: DndValue>(
    dnd: DndSignals<K, T>,
    target: T,
    handlers: DragHandlers<K, T>,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        let Some(dragging) = dnd.dragging_id_read.get_untracked() else {
            return;
        };
        dnd.drop_target_write.set(Some(target.clone()));
        if let Some(on_over) = handlers.on_over {
            on_over.run((dragging, target.clone()));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K: DndValue, T: DndValue>(dnd: DndSignals<K, T>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind document-wide mousemove/mouseup for the lifetime of the calling owner
pub fn bind_global_handlers<K: DndValue, T: DndValue>(dnd: DndSignals<K, T>, handlers: DragHandlers<K, T>) {
    let on_move = window_event_listener(leptos::ev::mousemove, move |ev: web_sys::MouseEvent| {
        let now = (ev.client_x(), ev.client_y());
        if dnd.dragging_id_read.with_untracked(Option::is_some) {
            dnd.pointer_write.set(now);
            return;
        }
        let Some(pending) = dnd.pending_id_read.get_untracked() else {
            return;
        };
        if exceeds_threshold(dnd.start_read.get_untracked(), now) {
            dnd.pointer_write.set(now);
            dnd.dragging_id_write.set(Some(pending.clone()));
            if let Some(on_start) = handlers.on_start {
                on_start.run(pending);
            }
        }
    });

    let on_up = window_event_listener(leptos::ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let outcome = release_outcome(dnd.dragging_id_read.get_untracked(), dnd.drop_target_read.get_untracked());
        end_drag(&dnd);
        // Click event will fire naturally on the element when nothing was dragged
        if let (Some(outcome), Some(on_end)) = (outcome, handlers.on_end) {
            on_end.run(outcome);
        }
    });

    on_cleanup(move || {
        on_move.remove();
        on_up.remove();
    });
}
