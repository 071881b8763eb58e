use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::TreeCanvasState;
use super::types::TreeData;
use super::viewport::INITIAL_SCALE;

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Pointer position relative to the canvas' top-left corner.
fn local_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn FamilyTreeCanvas(
	#[prop(into)] data: Signal<TreeData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<TreeCanvasState>>> = Rc::new(RefCell::new(None));
	let animate: Callback = Rc::new(RefCell::new(None));
	let resize_cb: Callback = Rc::new(RefCell::new(None));
	let release_cb: Callback = Rc::new(RefCell::new(None));
	let frame: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let zoom = RwSignal::new(INITIAL_SCALE);
	let dragging = RwSignal::new(false);
	let (state_init, animate_init, resize_cb_init, release_cb_init, frame_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		release_cb.clone(),
		frame.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		let mut initial = TreeCanvasState::new(&data.get_untracked(), w, h);
		initial.load_avatars();
		zoom.set(initial.viewport.scale);
		*state_init.borrow_mut() = Some(initial);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		// Registered on the window so a drag released outside the canvas still ends.
		let state_release = state_init.clone();
		*release_cb_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_release.borrow_mut() {
				s.release();
			}
			dragging.set(false);
		}));
		if let Some(ref cb) = *release_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("mouseup", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, frame_anim) =
			(state_init.clone(), animate_init.clone(), frame_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref s) = *state_anim.borrow() {
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let next = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
				frame_anim.set(next.ok());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			frame_init.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	// Cleanup callbacks must be Send; the closures stay on this thread.
	let listeners = StoredValue::new_local((
		animate.clone(),
		resize_cb.clone(),
		release_cb.clone(),
		frame.clone(),
	));
	on_cleanup(move || {
		listeners.try_with_value(|(animate, resize_cb, release_cb, frame)| {
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(id) = frame.take() {
				let _ = window.cancel_animation_frame(id);
			}
			animate.borrow_mut().take();
			for (event, cb) in [("resize", resize_cb), ("mouseup", release_cb)] {
				if let Some(cb) = cb.borrow_mut().take() {
					let _ = window
						.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
				}
			}
		});
	});

	let state_data = state.clone();
	Effect::new(move |_| {
		let tree = data.get();
		if let Some(ref mut s) = *state_data.borrow_mut() {
			s.set_tree(&tree);
			s.load_avatars();
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
			dragging.set(true);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(ev.delta_y(), ev.delta_mode(), x, y);
			zoom.set(s.viewport.scale);
		}
	};

	let viewport_action = move |action: fn(&mut TreeCanvasState)| {
		let state = state.clone();
		move |_: MouseEvent| {
			if let Some(ref mut s) = *state.borrow_mut() {
				action(s);
				zoom.set(s.viewport.scale);
			}
		}
	};
	let on_zoom_in = viewport_action(TreeCanvasState::zoom_in);
	let on_zoom_out = viewport_action(TreeCanvasState::zoom_out);
	let on_recenter = viewport_action(TreeCanvasState::recenter);

	view! {
		<div class="family-tree">
			<canvas
				node_ref=canvas_ref
				class="family-tree-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style:display="block"
				style:cursor=move || if dragging.get() { "grabbing" } else { "grab" }
			/>
			<div class="tree-controls">
				<button title="Zoom in" on:click=on_zoom_in>"+"</button>
				<button title="Zoom out" on:click=on_zoom_out>"−"</button>
				<button title="Re-center" on:click=on_recenter>"⌖"</button>
				<span class="zoom-level">{move || format!("{:.0}%", zoom.get() * 100.0)}</span>
			</div>
		</div>
	}
}
