//! Static family template: where each role sits and who descends from whom.

use super::types::{Connection, GenderHint, NodeDefinition};

/// Id of the viewer's own node; it always receives the first fetched record.
pub const SELF_ID: &str = "you";

const fn node(
	id: &'static str,
	role: &'static str,
	x: f64,
	y: f64,
	hint: GenderHint,
) -> NodeDefinition {
	NodeDefinition {
		id,
		role,
		x,
		y,
		hint,
	}
}

/// Declaration order is assignment order.
pub static NODES: &[NodeDefinition] = &[
	node(SELF_ID, "You", -160.0, 0.0, GenderHint::Random),
	node("spouse", "Spouse", 160.0, 0.0, GenderHint::Opposite),
	node("father", "Father", -480.0, -380.0, GenderHint::Male),
	node("mother", "Mother", -160.0, -380.0, GenderHint::Female),
	node("father_in_law", "Father-in-law", 160.0, -380.0, GenderHint::Male),
	node("mother_in_law", "Mother-in-law", 480.0, -380.0, GenderHint::Female),
	node("paternal_grandfather", "Grandfather", -640.0, -760.0, GenderHint::Male),
	node("paternal_grandmother", "Grandmother", -320.0, -760.0, GenderHint::Female),
	node("maternal_grandfather", "Grandfather", 0.0, -760.0, GenderHint::Male),
	node("maternal_grandmother", "Grandmother", 320.0, -760.0, GenderHint::Female),
	node("brother", "Brother", -800.0, 0.0, GenderHint::Male),
	node("sister", "Sister", -480.0, 0.0, GenderHint::Female),
	node("sibling_in_law", "Sibling-in-law", 480.0, 0.0, GenderHint::Random),
	node("son", "Son", -160.0, 380.0, GenderHint::Male),
	node("daughter", "Daughter", 160.0, 380.0, GenderHint::Female),
];

pub static CONNECTIONS: &[Connection] = &[
	Connection {
		id: "paternal_grandparents",
		p1: "paternal_grandfather",
		p2: "paternal_grandmother",
		children: &["father"],
	},
	Connection {
		id: "maternal_grandparents",
		p1: "maternal_grandfather",
		p2: "maternal_grandmother",
		children: &["mother"],
	},
	Connection {
		id: "parents",
		p1: "father",
		p2: "mother",
		children: &["brother", "sister", SELF_ID],
	},
	Connection {
		id: "in_laws",
		p1: "father_in_law",
		p2: "mother_in_law",
		children: &["spouse", "sibling_in_law"],
	},
	Connection {
		id: "family",
		p1: SELF_ID,
		p2: "spouse",
		children: &["son", "daughter"],
	},
];

pub fn definition(id: &str) -> Option<&'static NodeDefinition> {
	NODES.iter().find(|n| n.id == id)
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn node_ids_are_unique() {
		let ids: HashSet<_> = NODES.iter().map(|n| n.id).collect();
		assert_eq!(ids.len(), NODES.len());
	}

	#[test]
	fn every_connection_references_a_declared_node() {
		for c in CONNECTIONS {
			assert!(definition(c.p1).is_some(), "{} p1", c.id);
			assert!(definition(c.p2).is_some(), "{} p2", c.id);
			for child in c.children {
				assert!(definition(child).is_some(), "{} child {child}", c.id);
			}
		}
	}

	#[test]
	fn viewer_is_first_and_spouse_is_opposite() {
		assert_eq!(NODES[0].id, SELF_ID);
		assert_eq!(definition("spouse").map(|d| d.hint), Some(GenderHint::Opposite));
	}
}
