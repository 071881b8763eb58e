//! Person source and the per-slot assignment policy.

use std::collections::VecDeque;

use log::{error, info, warn};
use serde::Deserialize;

use super::layout::SELF_ID;
use super::types::{FamilyNode, Gender, GenderHint, NodeData, NodeDefinition, PersonRecord};

#[derive(Clone, Debug)]
pub struct FetchConfig {
	pub endpoint: String,
	pub batch_size: usize,
	pub fields: String,
}

impl Default for FetchConfig {
	fn default() -> Self {
		Self {
			endpoint: "https://randomuser.me/api/".into(),
			batch_size: 50,
			fields: "name,picture,dob,gender,nat".into(),
		}
	}
}

impl FetchConfig {
	pub fn url(&self) -> String {
		format!(
			"{}?results={}&inc={}",
			self.endpoint, self.batch_size, self.fields
		)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
	#[error("request failed: {0}")]
	Network(String),
	#[error("server responded {status} {text}")]
	Status { status: u16, text: String },
	#[error("malformed response: {0}")]
	Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ApiResponse {
	results: Vec<ApiPerson>,
}

#[derive(Deserialize)]
struct ApiPerson {
	gender: String,
	name: ApiName,
	picture: ApiPicture,
	dob: ApiDob,
	#[serde(default)]
	nat: String,
}

#[derive(Deserialize)]
struct ApiName {
	first: String,
	last: String,
}

#[derive(Deserialize)]
struct ApiPicture {
	#[serde(default)]
	large: Option<String>,
	#[serde(default)]
	medium: Option<String>,
}

#[derive(Deserialize)]
struct ApiDob {
	age: u32,
}

impl ApiPerson {
	fn into_record(self) -> Option<PersonRecord> {
		let Some(gender) = Gender::parse(&self.gender) else {
			warn!("dropping record with gender {:?}", self.gender);
			return None;
		};
		Some(PersonRecord {
			first_name: self.name.first,
			last_name: self.name.last,
			avatar_url: self
				.picture
				.large
				.or(self.picture.medium)
				.unwrap_or_default(),
			age: self.dob.age,
			gender,
			nationality: self.nat,
		})
	}
}

/// Decode a response body, preserving fetch order.
pub fn parse_people(body: &[u8]) -> Result<Vec<PersonRecord>, FetchError> {
	let response: ApiResponse = serde_json::from_slice(body)?;
	Ok(response
		.results
		.into_iter()
		.filter_map(ApiPerson::into_record)
		.collect())
}

/// Issue the single GET; `on_done` runs once with the decoded batch.
pub fn fetch_people(
	config: &FetchConfig,
	on_done: impl FnOnce(Result<Vec<PersonRecord>, FetchError>) + Send + 'static,
) {
	let request = ehttp::Request::get(config.url());
	ehttp::fetch(request, move |result| {
		let people = match result {
			Err(e) => Err(FetchError::Network(e)),
			Ok(response) if !response.ok => Err(FetchError::Status {
				status: response.status,
				text: response.status_text,
			}),
			Ok(response) => parse_people(&response.bytes),
		};
		on_done(people);
	});
}

/// Fetch a batch and hand back the populated template. Any failure yields an
/// empty node list.
pub fn load_family(
	config: &FetchConfig,
	definitions: &'static [NodeDefinition],
	on_loaded: impl FnOnce(Vec<FamilyNode>) + Send + 'static,
) {
	fetch_people(config, move |result| on_loaded(nodes_from(definitions, result)));
}

/// Populated template for a fetch outcome; errors are logged and give no nodes.
pub fn nodes_from(
	definitions: &[NodeDefinition],
	result: Result<Vec<PersonRecord>, FetchError>,
) -> Vec<FamilyNode> {
	match result {
		Ok(people) => {
			info!("fetched {} people", people.len());
			assign_family_data(definitions, people)
		}
		Err(e) => {
			error!("could not load family data: {e}");
			Vec::new()
		}
	}
}

/// FIFO pools over a fetched batch. The first record is held back for the
/// viewer and never enters a pool.
struct RecordPools {
	records: Vec<Option<PersonRecord>>,
	male: VecDeque<usize>,
	female: VecDeque<usize>,
	remaining: VecDeque<usize>,
}

impl RecordPools {
	fn new(records: Vec<PersonRecord>) -> Self {
		let mut pools = Self {
			records: records.into_iter().map(Some).collect(),
			male: VecDeque::new(),
			female: VecDeque::new(),
			remaining: VecDeque::new(),
		};
		for (i, record) in pools.records.iter().enumerate().skip(1) {
			if let Some(record) = record {
				match record.gender {
					Gender::Male => pools.male.push_back(i),
					Gender::Female => pools.female.push_back(i),
				}
				pools.remaining.push_back(i);
			}
		}
		pools
	}

	fn take_first(&mut self) -> Option<PersonRecord> {
		self.records.first_mut().and_then(Option::take)
	}

	/// Front of the gender pool, else front of whatever is left overall.
	/// Records already handed out are skipped so nobody appears twice.
	fn pop(&mut self, gender: Gender) -> Option<PersonRecord> {
		let pool = match gender {
			Gender::Male => &mut self.male,
			Gender::Female => &mut self.female,
		};
		while let Some(i) = pool.pop_front() {
			if let Some(record) = self.records[i].take() {
				return Some(record);
			}
		}
		while let Some(i) = self.remaining.pop_front() {
			if let Some(record) = self.records[i].take() {
				return Some(record);
			}
		}
		None
	}
}

/// Give every layout slot at most one record, in declaration order.
pub fn assign_family_data(
	definitions: &[NodeDefinition],
	people: Vec<PersonRecord>,
) -> Vec<FamilyNode> {
	let mut pools = RecordPools::new(people);
	let mut viewer = pools.take_first();
	let opposite = viewer
		.as_ref()
		.map_or(Gender::Female, |p| p.gender.opposite());

	let nodes: Vec<FamilyNode> = definitions
		.iter()
		.map(|&definition| {
			let person = if definition.id == SELF_ID {
				viewer.take()
			} else {
				match definition.hint {
					GenderHint::Male | GenderHint::Random => pools.pop(Gender::Male),
					GenderHint::Female => pools.pop(Gender::Female),
					GenderHint::Opposite => pools.pop(opposite),
				}
			};
			FamilyNode {
				definition,
				data: person.map_or(NodeData::Unavailable, NodeData::Assigned),
			}
		})
		.collect();

	let unavailable = nodes
		.iter()
		.filter(|n| n.data == NodeData::Unavailable)
		.count();
	if unavailable > 0 {
		warn!("{unavailable} nodes left without data");
	}
	nodes
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::family_tree::connectors::route_all;
	use crate::components::family_tree::layout::{CONNECTIONS, NODES};

	fn person(name: &str, gender: Gender) -> PersonRecord {
		PersonRecord {
			first_name: name.into(),
			last_name: "Test".into(),
			avatar_url: format!("https://example.test/{name}.jpg"),
			age: 40,
			gender,
			nationality: "NZ".into(),
		}
	}

	fn def(id: &'static str, hint: GenderHint) -> NodeDefinition {
		NodeDefinition {
			id,
			role: id,
			x: 0.0,
			y: 0.0,
			hint,
		}
	}

	fn assigned<'a>(nodes: &'a [FamilyNode], id: &str) -> Option<&'a PersonRecord> {
		nodes.iter().find(|n| n.id() == id).and_then(FamilyNode::person)
	}

	#[test]
	fn viewer_gets_first_record_verbatim() {
		let batch = vec![
			person("Aroha", Gender::Female),
			person("Ben", Gender::Male),
			person("Cara", Gender::Female),
		];
		let first = batch[0].clone();
		let nodes = assign_family_data(NODES, batch);
		assert_eq!(assigned(&nodes, SELF_ID), Some(&first));
	}

	#[test]
	fn male_viewer_gets_female_spouse() {
		let batch = vec![
			person("Adam", Gender::Male),
			person("Bob", Gender::Male),
			person("Cleo", Gender::Female),
			person("Dan", Gender::Male),
		];
		let defs = [
			def(SELF_ID, GenderHint::Random),
			def("spouse", GenderHint::Opposite),
			def("other", GenderHint::Opposite),
		];
		let nodes = assign_family_data(&defs, batch);
		assert_eq!(assigned(&nodes, "spouse").map(|p| p.gender), Some(Gender::Female));
		assert_eq!(assigned(&nodes, "spouse").map(|p| p.first_name.as_str()), Some("Cleo"));
		// Female pool is dry; falls back to the overall list.
		assert_eq!(assigned(&nodes, "other").map(|p| p.first_name.as_str()), Some("Bob"));
	}

	#[test]
	fn pools_are_fifo_and_random_draws_male() {
		let batch = vec![
			person("Viewer", Gender::Female),
			person("M1", Gender::Male),
			person("F1", Gender::Female),
			person("M2", Gender::Male),
		];
		let defs = [
			def(SELF_ID, GenderHint::Random),
			def("a", GenderHint::Random),
			def("b", GenderHint::Male),
			def("c", GenderHint::Female),
		];
		let nodes = assign_family_data(&defs, batch);
		let names: Vec<_> = nodes
			.iter()
			.map(|n| n.person().map(|p| p.first_name.clone()))
			.collect();
		assert_eq!(
			names,
			vec![
				Some("Viewer".to_string()),
				Some("M1".to_string()),
				Some("M2".to_string()),
				Some("F1".to_string()),
			]
		);
	}

	#[test]
	fn exhausted_pools_mark_nodes_unavailable() {
		let batch = vec![person("Solo", Gender::Male), person("Eve", Gender::Female)];
		let defs = [
			def(SELF_ID, GenderHint::Random),
			def("spouse", GenderHint::Opposite),
			def("father", GenderHint::Male),
			def("mother", GenderHint::Female),
		];
		let nodes = assign_family_data(&defs, batch);
		assert!(assigned(&nodes, SELF_ID).is_some());
		assert!(assigned(&nodes, "spouse").is_some());
		assert_eq!(nodes[2].data, NodeData::Unavailable);
		assert_eq!(nodes[3].data, NodeData::Unavailable);
	}

	#[test]
	fn no_record_is_handed_out_twice() {
		let batch: Vec<_> = (0..8)
			.map(|i| person(&format!("P{i}"), if i % 3 == 0 { Gender::Female } else { Gender::Male }))
			.collect();
		let nodes = assign_family_data(NODES, batch);
		let mut names: Vec<_> = nodes
			.iter()
			.filter_map(|n| n.person().map(|p| p.first_name.clone()))
			.collect();
		assert_eq!(names.len(), 8);
		names.sort();
		names.dedup();
		assert_eq!(names.len(), 8);
	}

	#[test]
	fn empty_batch_leaves_every_node_unavailable() {
		let nodes = assign_family_data(NODES, Vec::new());
		assert_eq!(nodes.len(), NODES.len());
		assert!(nodes.iter().all(|n| n.data == NodeData::Unavailable));
	}

	#[test]
	fn parses_api_body() {
		let body = br#"{
			"results": [
				{
					"gender": "female",
					"name": {"title": "Ms", "first": "Mia", "last": "Roa"},
					"picture": {"large": "https://x/l.jpg", "medium": "https://x/m.jpg"},
					"dob": {"date": "1980-01-01T00:00:00Z", "age": 45},
					"nat": "NZ"
				},
				{
					"gender": "unknown",
					"name": {"first": "X", "last": "Y"},
					"picture": {"medium": "https://x/m.jpg"},
					"dob": {"age": 1}
				}
			],
			"info": {"results": 2}
		}"#;
		let people = parse_people(body).expect("valid body");
		assert_eq!(people.len(), 1);
		assert_eq!(people[0].full_name(), "Mia Roa");
		assert_eq!(people[0].avatar_url, "https://x/l.jpg");
		assert_eq!(people[0].age, 45);
		assert_eq!(people[0].gender, Gender::Female);
		assert_eq!(people[0].nationality, "NZ");
	}

	#[test]
	fn malformed_body_is_a_decode_error() {
		assert!(matches!(parse_people(b"{\"oops\": 1}"), Err(FetchError::Decode(_))));
		assert!(matches!(parse_people(b"not json"), Err(FetchError::Decode(_))));
	}

	#[test]
	fn url_carries_count_and_fields() {
		let url = FetchConfig::default().url();
		assert_eq!(
			url,
			"https://randomuser.me/api/?results=50&inc=name,picture,dob,gender,nat"
		);
	}

	#[test]
	fn failed_fetch_yields_an_empty_tree() {
		let failures = [
			Err(FetchError::Network("connection refused".into())),
			Err(FetchError::Status {
				status: 503,
				text: "Service Unavailable".into(),
			}),
			parse_people(b"<html>oops</html>"),
		];
		for result in failures {
			assert!(result.is_err());
			let nodes = nodes_from(NODES, result);
			assert!(nodes.is_empty());
			assert!(route_all(CONNECTIONS, &nodes).is_empty());
		}
	}

	#[test]
	fn successful_fetch_populates_the_template() {
		let batch = vec![person("Kai", Gender::Male), person("Lena", Gender::Female)];
		let nodes = nodes_from(NODES, Ok(batch));
		assert_eq!(nodes.len(), NODES.len());
		assert_eq!(assigned(&nodes, SELF_ID).map(|p| p.first_name.as_str()), Some("Kai"));
		assert_eq!(route_all(CONNECTIONS, &nodes).len(), CONNECTIONS.len());
	}
}
