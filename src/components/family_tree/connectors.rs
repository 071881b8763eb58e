//! Orthogonal parent/child connector geometry, in world units.

use std::collections::HashMap;

use super::types::{Connection, FamilyNode};

/// How far below the parent line the children's branches split.
pub const DROP_HEIGHT: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorPath {
	pub connection_id: &'static str,
	/// Drawn at the first parent's y even when the second sits elsewhere.
	pub parent_line: [Point; 2],
	pub drop: [Point; 2],
	/// Joint marker between the parents.
	pub marker: Point,
	/// Junction → child x at junction y → child.
	pub child_legs: Vec<[Point; 3]>,
}

impl ConnectorPath {
	/// Every straight segment, for drawing or inspection.
	pub fn segments(&self) -> Vec<[Point; 2]> {
		let mut segments = vec![self.parent_line, self.drop];
		for [a, b, c] in &self.child_legs {
			segments.push([*a, *b]);
			segments.push([*b, *c]);
		}
		segments
	}
}

/// `None` when either parent is missing. Missing children are dropped
/// one by one.
pub fn route(
	connection: &Connection,
	nodes: &HashMap<&str, &FamilyNode>,
) -> Option<ConnectorPath> {
	let p1 = nodes.get(connection.p1)?;
	let p2 = nodes.get(connection.p2)?;

	let (top, mid_x) = (p1.y(), (p1.x() + p2.x()) / 2.0);
	let junction = Point::new(mid_x, top + DROP_HEIGHT);

	let child_legs = connection
		.children
		.iter()
		.filter_map(|id| nodes.get(*id))
		.map(|child| {
			[
				junction,
				Point::new(child.x(), junction.y),
				Point::new(child.x(), child.y()),
			]
		})
		.collect();

	Some(ConnectorPath {
		connection_id: connection.id,
		parent_line: [Point::new(p1.x(), top), Point::new(p2.x(), top)],
		drop: [Point::new(mid_x, top), junction],
		marker: Point::new(mid_x, top),
		child_legs,
	})
}

pub fn route_all(connections: &[Connection], nodes: &[FamilyNode]) -> Vec<ConnectorPath> {
	let index: HashMap<&str, &FamilyNode> = nodes.iter().map(|n| (n.id(), n)).collect();
	connections
		.iter()
		.filter_map(|c| {
			let path = route(c, &index);
			if path.is_none() {
				log::debug!("skipping connection {}: parent missing", c.id);
			}
			path
		})
		.collect()
}
