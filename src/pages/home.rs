use leptos::prelude::*;

use crate::components::family_tree::layout::{CONNECTIONS, NODES};
use crate::components::family_tree::{
	FamilyNode, FamilyTreeCanvas, FetchConfig, TreeData, load_family,
};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	// `None` while the fetch is outstanding.
	let nodes = RwSignal::new(None::<Vec<FamilyNode>>);
	load_family(&FetchConfig::default(), NODES, move |loaded| {
		nodes.set(Some(loaded));
	});

	let tree = Signal::derive(move || TreeData {
		nodes: nodes.get().unwrap_or_default(),
		connections: CONNECTIONS.to_vec(),
	});
	let loading = move || nodes.with(Option::is_none);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-tree">
				<FamilyTreeCanvas data=tree fullscreen=true />
				<div class="tree-overlay">
					<h1>"Family Tree"</h1>
					<p class="subtitle">"Drag to pan. Scroll to zoom around the cursor."</p>
				</div>
				<Show when=loading>
					<div class="loading-overlay">
						<p>"Loading family…"</p>
					</div>
				</Show>
			</div>
		</ErrorBoundary>
	}
}
