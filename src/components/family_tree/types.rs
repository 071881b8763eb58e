/// Biological sex as reported by the person source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
	Male,
	Female,
}

impl Gender {
	pub fn opposite(self) -> Self {
		match self {
			Gender::Male => Gender::Female,
			Gender::Female => Gender::Male,
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"male" => Some(Gender::Male),
			"female" => Some(Gender::Female),
			_ => None,
		}
	}
}

/// Which record pool a layout slot draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenderHint {
	Male,
	Female,
	/// Opposite of the viewer's own gender.
	Opposite,
	Random,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeDefinition {
	pub id: &'static str,
	pub role: &'static str,
	pub x: f64,
	pub y: f64,
	pub hint: GenderHint,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PersonRecord {
	pub first_name: String,
	pub last_name: String,
	pub avatar_url: String,
	pub age: u32,
	pub gender: Gender,
	pub nationality: String,
}

impl PersonRecord {
	pub fn full_name(&self) -> String {
		format!("{} {}", self.first_name, self.last_name)
	}
}

/// Assignment outcome for a single node.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum NodeData {
	/// Not assigned yet.
	#[default]
	Deferred,
	Assigned(PersonRecord),
	/// Every pool ran dry before this node was reached.
	Unavailable,
}

impl NodeData {
	pub fn person(&self) -> Option<&PersonRecord> {
		match self {
			NodeData::Assigned(person) => Some(person),
			_ => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct FamilyNode {
	pub definition: NodeDefinition,
	pub data: NodeData,
}

impl FamilyNode {
	pub fn id(&self) -> &'static str {
		self.definition.id
	}

	pub fn x(&self) -> f64 {
		self.definition.x
	}

	pub fn y(&self) -> f64 {
		self.definition.y
	}

	pub fn person(&self) -> Option<&PersonRecord> {
		self.data.person()
	}
}

impl From<NodeDefinition> for FamilyNode {
	fn from(definition: NodeDefinition) -> Self {
		Self {
			definition,
			data: NodeData::Deferred,
		}
	}
}

/// Parent couple and their children, referenced by node id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	pub id: &'static str,
	pub p1: &'static str,
	pub p2: &'static str,
	pub children: &'static [&'static str],
}

/// Everything the tree widget draws.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeData {
	pub nodes: Vec<FamilyNode>,
	pub connections: Vec<Connection>,
}
