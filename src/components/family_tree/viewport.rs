//! Screen-space pan and zoom over the world plane.

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 4.0;
pub const INITIAL_SCALE: f64 = 0.7;
pub const RECENTER_SCALE: f64 = 0.8;
pub const BUTTON_ZOOM_FACTOR: f64 = 1.2;
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;
pub const PIXELS_PER_LINE: f64 = 16.0;

const DOM_DELTA_LINE: u32 = 1;
const DOM_DELTA_PAGE: u32 = 2;

/// Wheel delta in pixels; line and page deltas (Firefox) are scaled up.
pub fn wheel_delta_pixels(delta: f64, delta_mode: u32, page_height: f64) -> f64 {
	match delta_mode {
		DOM_DELTA_LINE => delta * PIXELS_PER_LINE,
		DOM_DELTA_PAGE => delta * page_height,
		_ => delta,
	}
}

/// `(x, y)` is where world origin lands on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub x: f64,
	pub y: f64,
	pub scale: f64,
}

impl Viewport {
	/// World origin at the middle of a `width` × `height` screen.
	pub fn centered(width: f64, height: f64, scale: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			scale: scale.clamp(MIN_SCALE, MAX_SCALE),
		}
	}

	pub fn initial(width: f64, height: f64) -> Self {
		Self::centered(width, height, INITIAL_SCALE)
	}

	pub fn recenter(&mut self, width: f64, height: f64) {
		*self = Self::centered(width, height, RECENTER_SCALE);
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}

	/// Multiply scale by `factor`, keeping the world point under `(px, py)`
	/// fixed on screen.
	pub fn zoom_at(&mut self, factor: f64, px: f64, py: f64) {
		let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
		let ratio = new_scale / self.scale;
		self.x = px - (px - self.x) * ratio;
		self.y = py - (py - self.y) * ratio;
		self.scale = new_scale;
	}

	pub fn wheel(&mut self, delta_y: f64, px: f64, py: f64) {
		self.zoom_at((-delta_y * WHEEL_ZOOM_SENSITIVITY).exp(), px, py);
	}

	pub fn zoom_in(&mut self, width: f64, height: f64) {
		self.zoom_at(BUTTON_ZOOM_FACTOR, width / 2.0, height / 2.0);
	}

	pub fn zoom_out(&mut self, width: f64, height: f64) {
		self.zoom_at(1.0 / BUTTON_ZOOM_FACTOR, width / 2.0, height / 2.0);
	}

	pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		(wx * self.scale + self.x, wy * self.scale + self.y)
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.scale, (sy - self.y) / self.scale)
	}
}

/// Pointer drag tracking, live only between press and release.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragGesture {
	#[default]
	Idle,
	Dragging {
		last_x: f64,
		last_y: f64,
	},
}

impl DragGesture {
	pub fn press(&mut self, x: f64, y: f64) {
		*self = DragGesture::Dragging {
			last_x: x,
			last_y: y,
		};
	}

	/// Movement since the previous pointer position, if a drag is in progress.
	pub fn move_to(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
		match self {
			DragGesture::Idle => None,
			DragGesture::Dragging { last_x, last_y } => {
				let delta = (x - *last_x, y - *last_y);
				*last_x = x;
				*last_y = y;
				Some(delta)
			}
		}
	}

	pub fn release(&mut self) {
		*self = DragGesture::Idle;
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self, DragGesture::Dragging { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f64 = 1e-9;

	fn close(a: (f64, f64), b: (f64, f64)) -> bool {
		(a.0 - b.0).abs() < 1e-6 && (a.1 - b.1).abs() < 1e-6
	}

	#[test]
	fn wheel_zoom_keeps_cursor_point_fixed() {
		let cursor = (312.5, 97.0);
		for &scale in &[0.1, 0.35, 1.0, 2.5, 4.0] {
			for &delta in &[-2400.0, -120.0, -1.0, 0.0, 3.0, 100.0, 5000.0] {
				let mut vp = Viewport {
					x: -40.0,
					y: 220.0,
					scale,
				};
				let world = vp.screen_to_world(cursor.0, cursor.1);
				vp.wheel(delta, cursor.0, cursor.1);
				assert!(
					close(vp.world_to_screen(world.0, world.1), cursor),
					"scale {scale} delta {delta}"
				);
			}
		}
	}

	#[test]
	fn wheel_deltas_normalise_to_pixels() {
		assert_eq!(wheel_delta_pixels(-120.0, 0, 600.0), -120.0);
		assert_eq!(wheel_delta_pixels(3.0, 1, 600.0), 48.0);
		assert_eq!(wheel_delta_pixels(-1.0, 2, 600.0), -600.0);
	}

	#[test]
	fn wheel_uses_exponential_factor() {
		let mut vp = Viewport::centered(800.0, 600.0, 1.0);
		vp.wheel(-100.0, 400.0, 300.0);
		assert!((vp.scale - 0.1f64.exp()).abs() < EPS);
	}

	#[test]
	fn scale_stays_clamped() {
		let mut vp = Viewport::initial(1000.0, 800.0);
		for _ in 0..100 {
			vp.zoom_in(1000.0, 800.0);
			vp.wheel(-500.0, 10.0, 10.0);
		}
		assert!((vp.scale - MAX_SCALE).abs() < EPS);
		for _ in 0..100 {
			vp.zoom_out(1000.0, 800.0);
			vp.wheel(900.0, 700.0, 20.0);
		}
		assert!((vp.scale - MIN_SCALE).abs() < EPS);
	}

	#[test]
	fn button_zoom_anchors_at_screen_center() {
		let mut vp = Viewport {
			x: 10.0,
			y: -30.0,
			scale: 0.9,
		};
		let center = (640.0, 360.0);
		let world = vp.screen_to_world(center.0, center.1);
		vp.zoom_in(1280.0, 720.0);
		assert!((vp.scale - 0.9 * BUTTON_ZOOM_FACTOR).abs() < EPS);
		assert!(close(vp.world_to_screen(world.0, world.1), center));
		vp.zoom_out(1280.0, 720.0);
		assert!((vp.scale - 0.9).abs() < EPS);
		assert!(close(vp.world_to_screen(world.0, world.1), center));
	}

	#[test]
	fn recenter_is_a_full_reset() {
		let mut vp = Viewport {
			x: 9000.0,
			y: -12.0,
			scale: 3.3,
		};
		vp.recenter(1024.0, 768.0);
		assert_eq!(
			vp,
			Viewport {
				x: 512.0,
				y: 384.0,
				scale: RECENTER_SCALE
			}
		);
	}

	#[test]
	fn initial_view_uses_its_own_default_scale() {
		let vp = Viewport::initial(1024.0, 768.0);
		assert_eq!((vp.x, vp.y, vp.scale), (512.0, 384.0, INITIAL_SCALE));
	}

	#[test]
	fn pan_is_additive() {
		let mut split = Viewport::initial(800.0, 600.0);
		let mut joined = split;
		split.pan_by(13.0, -4.5);
		split.pan_by(-2.0, 40.0);
		joined.pan_by(11.0, 35.5);
		assert!(close((split.x, split.y), (joined.x, joined.y)));
		assert_eq!(split.scale, INITIAL_SCALE);
	}

	#[test]
	fn world_to_screen_applies_scale_then_offset() {
		let vp = Viewport {
			x: 100.0,
			y: 50.0,
			scale: 0.5,
		};
		assert_eq!(vp.world_to_screen(-160.0, 140.0), (20.0, 120.0));
		assert_eq!(vp.screen_to_world(20.0, 120.0), (-160.0, 140.0));
	}

	#[test]
	fn drag_reports_deltas_only_while_pressed() {
		let mut drag = DragGesture::default();
		assert_eq!(drag.move_to(5.0, 5.0), None);
		drag.press(10.0, 10.0);
		assert!(drag.is_dragging());
		assert_eq!(drag.move_to(15.0, 7.0), Some((5.0, -3.0)));
		assert_eq!(drag.move_to(20.0, 20.0), Some((5.0, 13.0)));
		drag.release();
		assert_eq!(drag.move_to(30.0, 30.0), None);
		assert!(!drag.is_dragging());
	}
}
