use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::connectors::ConnectorPath;
use super::state::{AVATAR_RADIUS, CARD_HEIGHT, CARD_WIDTH, TreeCanvasState};
use super::types::{FamilyNode, PersonRecord};

const BACKGROUND: &str = "#f4f1ea";
const LINE_COLOR: &str = "#8a7f72";
const CARD_FILL: &str = "#ffffff";
const CARD_BORDER: &str = "#d6cfc4";
const CARD_BORDER_HOVER: &str = "#c0843d";
const TEXT_PRIMARY: &str = "#2d2a26";
const TEXT_SECONDARY: &str = "#7a726a";
const MARKER_RADIUS: f64 = 6.0;

pub fn render(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let vp = state.viewport;
	let _ = ctx.translate(vp.x, vp.y);
	let _ = ctx.scale(vp.scale, vp.scale);
	draw_connectors(&state.connectors, ctx);
	draw_cards(state, ctx);
	ctx.restore();
}

fn draw_connectors(connectors: &[ConnectorPath], ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(LINE_COLOR);
	ctx.set_line_width(2.0);
	ctx.set_line_join("round");

	for path in connectors {
		ctx.begin_path();
		for [from, to] in path.segments() {
			ctx.move_to(from.x, from.y);
			ctx.line_to(to.x, to.y);
		}
		ctx.stroke();

		ctx.set_fill_style_str(LINE_COLOR);
		ctx.begin_path();
		let _ = ctx.arc(path.marker.x, path.marker.y, MARKER_RADIUS, 0.0, 2.0 * PI);
		ctx.fill();
	}
}

fn draw_cards(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d) {
	for node in &state.nodes {
		// Unassigned slots stay blank.
		if let Some(person) = node.person() {
			draw_card(state, node, person, ctx);
		}
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_card(
	state: &TreeCanvasState,
	node: &FamilyNode,
	person: &PersonRecord,
	ctx: &CanvasRenderingContext2d,
) {
	let (left, top) = (node.x() - CARD_WIDTH / 2.0, node.y() - CARD_HEIGHT / 2.0);
	let hovered = state.hovered == Some(node.id());

	rounded_rect(ctx, left, top, CARD_WIDTH, CARD_HEIGHT, 12.0);
	ctx.set_fill_style_str(CARD_FILL);
	ctx.fill();
	ctx.set_stroke_style_str(if hovered { CARD_BORDER_HOVER } else { CARD_BORDER });
	ctx.set_line_width(if hovered { 3.0 } else { 1.5 });
	ctx.stroke();

	let (cx, cy) = (left + 18.0 + AVATAR_RADIUS, node.y());
	ctx.save();
	ctx.begin_path();
	let _ = ctx.arc(cx, cy, AVATAR_RADIUS, 0.0, 2.0 * PI);
	ctx.clip();
	match state.avatar(&person.avatar_url) {
		Some(img) => {
			let d = AVATAR_RADIUS * 2.0;
			let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
				img,
				cx - AVATAR_RADIUS,
				cy - AVATAR_RADIUS,
				d,
				d,
			);
		}
		None => {
			ctx.set_fill_style_str(CARD_BORDER);
			ctx.fill();
		}
	}
	ctx.restore();

	let text_x = cx + AVATAR_RADIUS + 14.0;
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(TEXT_SECONDARY);
	ctx.set_font("600 12px sans-serif");
	let _ = ctx.fill_text(&node.definition.role.to_uppercase(), text_x, cy - 24.0);
	ctx.set_fill_style_str(TEXT_PRIMARY);
	ctx.set_font("16px sans-serif");
	let _ = ctx.fill_text(&person.full_name(), text_x, cy);
	ctx.set_fill_style_str(TEXT_SECONDARY);
	ctx.set_font("13px sans-serif");
	let _ = ctx.fill_text(
		&format!("{} · {}", person.age, person.nationality),
		text_x,
		cy + 22.0,
	);
}
