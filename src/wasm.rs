use std::collections::BTreeMap;
use std::num::NonZero;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::builder::GeneratorBuilder;
use crate::generator::Generator;
use crate::location::Position;
use crate::output::HighlightDocument;

#[derive(Serialize)]
struct LayoutDocument {
    rows: Vec<String>,
    times: BTreeMap<String, Vec<Position>>,
}

/// A clock generator that always gives up eventually; there is no way to interrupt a call from the page.
fn bounded_generator(width: usize, height: usize, max_attempts: usize) -> Result<Generator, String> {
    let (Some(width), Some(height)) = (NonZero::new(width), NonZero::new(height)) else {
        return Err("width and height must be positive".to_string());
    };
    let Some(max_attempts) = NonZero::new(max_attempts) else {
        return Err("max_attempts must be positive".to_string());
    };

    GeneratorBuilder::with_dims((width, height))
        .max_attempts(Some(max_attempts))
        .build()
        .map_err(|reasons| reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))
}

/// Lay out the clock on a `width` by `height` grid and return it as JSON: `{"rows": [...], "times": {"HH:MM": [[x, y], ...]}}`.
///
/// Gives up after `max_attempts` fresh grids, which must be positive.
#[wasm_bindgen(js_name = generateLayout)]
pub fn generate_layout(width: usize, height: usize, seed: u64, max_attempts: usize) -> Result<String, JsValue> {
    let generator = bounded_generator(width, height, max_attempts).map_err(|err| JsValue::from_str(&err))?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut layout = generator.generate(&mut rng).map_err(|stall| JsValue::from_str(&stall.to_string()))?;
    layout.fill(&mut rng);

    let document = LayoutDocument {
        rows: layout.grid().render(&Default::default()).lines().map(str::to_string).collect(),
        times: HighlightDocument::from(&layout).0,
    };

    serde_json::to_string(&document).map_err(|err| JsValue::from_str(&err.to_string()))
}
