use serde::{Deserialize, Serialize};
use serde_json::json;
use tether_core::prelude::*;
use tether_store::*;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Counter {
    label: String,
    count: i64,
}
impl Model for Counter {}

struct App {
    root: Component,
    left: Component,
    right: Component,
    badge: Component,
}

impl App {
    fn new() -> Self {
        Self {
            root: Component::new("App"),
            left: Component::new("LeftPanel"),
            right: Component::new("RightPanel"),
            badge: Component::new("Badge"),
        }
    }

    /// One frame: the root owns the default counter and a second one keyed
    /// "secondary"; panels read whichever they are interested in.
    fn frame(&self) -> anyhow::Result<(Store<Counter>, String)> {
        self.root.render(|| -> anyhow::Result<_> {
            let main = use_create_store_from::<Counter>(json!({ "label": "main" }))?;
            let secondary = use_create_store_from::<Counter>(json!({ "label": "secondary", "count": 100 }))?;

            let main_provider = use_provider::<Counter>()?;
            let secondary_provider = use_provider_with_id::<Counter>("secondary")?;

            let line = main_provider.provide(main.clone(), || {
                secondary_provider.provide(secondary, || -> anyhow::Result<String> {
                    let left = self.left.render(|| use_store_map::<Counter, _>(|c| c.count))?;
                    let right = self
                        .right
                        .render(|| use_store_map_with_id::<Counter, _>("secondary", |c| c.count))?;
                    let badge = self.badge.render(|| {
                        use_store_map::<Counter, _>(|c| format!("{}:{}", c.label, c.count))
                    })?;
                    Ok(format!(
                        "left={} right={} badge={}",
                        left.unwrap_or_default(),
                        right.unwrap_or_default(),
                        badge.unwrap_or_default()
                    ))
                })
            })?;

            Ok((main, line))
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let app = App::new();
    let (main, first) = app.frame()?;
    println!("{first}");

    let _sub = main.subscribe(|c| log::info!("{} changed to {}", c.label, c.count));
    for _ in 0..3 {
        main.update(|c| c.count += 1);
        let (_, line) = app.frame()?;
        println!("{line}");
    }

    println!("snapshot: {}", main.snapshot()?);
    app.root.dispose();
    Ok(())
}
