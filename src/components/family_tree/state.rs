use std::collections::HashMap;

use web_sys::HtmlImageElement;

use super::connectors::{ConnectorPath, route_all};
use super::types::{FamilyNode, TreeData};
use super::viewport::{DragGesture, Viewport, wheel_delta_pixels};

pub const CARD_WIDTH: f64 = 220.0;
pub const CARD_HEIGHT: f64 = 96.0;
pub const AVATAR_RADIUS: f64 = 30.0;

pub struct TreeCanvasState {
	pub nodes: Vec<FamilyNode>,
	pub connectors: Vec<ConnectorPath>,
	pub viewport: Viewport,
	pub drag: DragGesture,
	pub hovered: Option<&'static str>,
	pub width: f64,
	pub height: f64,
	avatars: HashMap<String, HtmlImageElement>,
}

impl TreeCanvasState {
	pub fn new(data: &TreeData, width: f64, height: f64) -> Self {
		let mut state = Self {
			nodes: Vec::new(),
			connectors: Vec::new(),
			viewport: Viewport::initial(width, height),
			drag: DragGesture::Idle,
			hovered: None,
			width,
			height,
			avatars: HashMap::new(),
		};
		state.set_tree(data);
		state
	}

	/// Swap in a freshly loaded tree; the view is left where the user put it.
	pub fn set_tree(&mut self, data: &TreeData) {
		self.nodes = data.nodes.clone();
		self.connectors = route_all(&data.connections, &self.nodes);
		self.hovered = None;
		log::info!(
			"tree ready: {} nodes, {} connectors",
			self.nodes.len(),
			self.connectors.len()
		);
	}

	/// Start browser loads for avatars not requested yet.
	pub fn load_avatars(&mut self) {
		for node in &self.nodes {
			if let Some(person) = node.person() {
				if !self.avatars.contains_key(&person.avatar_url) {
					if let Ok(img) = HtmlImageElement::new() {
						img.set_src(&person.avatar_url);
						self.avatars.insert(person.avatar_url.clone(), img);
					}
				}
			}
		}
	}

	/// Loaded avatar for `url`, if the browser has finished fetching it.
	pub fn avatar(&self, url: &str) -> Option<&HtmlImageElement> {
		self.avatars
			.get(url)
			.filter(|img| img.complete() && img.natural_width() > 0)
	}

	/// Id of the populated card under a screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<&'static str> {
		let (wx, wy) = self.viewport.screen_to_world(sx, sy);
		self.nodes
			.iter()
			.rev()
			.filter(|n| n.person().is_some())
			.find(|n| {
				(wx - n.x()).abs() <= CARD_WIDTH / 2.0 && (wy - n.y()).abs() <= CARD_HEIGHT / 2.0
			})
			.map(FamilyNode::id)
	}

	pub fn press(&mut self, sx: f64, sy: f64) {
		self.drag.press(sx, sy);
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		match self.drag.move_to(sx, sy) {
			Some((dx, dy)) => self.viewport.pan_by(dx, dy),
			None => self.hovered = self.node_at_position(sx, sy),
		}
	}

	pub fn release(&mut self) {
		self.drag.release();
	}

	/// Pointer left the canvas. A drag in progress keeps going.
	pub fn pointer_leave(&mut self) {
		self.hovered = None;
	}

	/// `delta_mode` is the DOM `WheelEvent.deltaMode`.
	pub fn wheel(&mut self, delta_y: f64, delta_mode: u32, sx: f64, sy: f64) {
		let delta = wheel_delta_pixels(delta_y, delta_mode, self.height);
		self.viewport.wheel(delta, sx, sy);
	}

	pub fn zoom_in(&mut self) {
		self.viewport.zoom_in(self.width, self.height);
	}

	pub fn zoom_out(&mut self) {
		self.viewport.zoom_out(self.width, self.height);
	}

	pub fn recenter(&mut self) {
		self.viewport.recenter(self.width, self.height);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
