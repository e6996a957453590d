//! WebAssembly bindings for charmcalc
//!
//! Charms, selections and results cross the boundary as JSON strings.

use crate::engine::{compute_charm_probability, rank_charms};
use crate::fraction::{decimal_to_fraction as rust_decimal_to_fraction, DEFAULT_MAX_DENOMINATOR};
use crate::selection::{CharmDescriptor, SelectionState};
use crate::tables::CharmTables;
use wasm_bindgen::prelude::*;

/// Format a probability as a display fraction
///
/// # Arguments
/// * `x` - Probability to format
/// * `max_denominator` - Denominator bound, defaults to 100,000,000
#[wasm_bindgen(js_name = decimalToFraction)]
pub fn decimal_to_fraction(x: f64, max_denominator: Option<f64>) -> String {
    let bound = max_denominator
        .filter(|d| d.is_finite() && *d >= 1.0)
        .map_or(DEFAULT_MAX_DENOMINATOR, |d| d as u64);
    rust_decimal_to_fraction(x, bound)
}

/// JavaScript-friendly calculator over one set of tables
#[wasm_bindgen]
pub struct Calculator {
    tables: CharmTables,
}

#[wasm_bindgen]
impl Calculator {
    /// Build a calculator from tables JSON
    #[wasm_bindgen(constructor)]
    pub fn new(tables_json: &str) -> Result<Calculator, JsValue> {
        let tables = CharmTables::from_json(tables_json)
            .map_err(|e| JsValue::from_str(&format!("Load failed: {}", e)))?;
        Ok(Calculator { tables })
    }

    /// Calculator over the bundled sample tables
    #[wasm_bindgen(js_name = sample)]
    pub fn sample() -> Result<Calculator, JsValue> {
        let tables = CharmTables::sample()
            .map_err(|e| JsValue::from_str(&format!("Load failed: {}", e)))?;
        Ok(Calculator {
            tables: tables.clone(),
        })
    }

    /// Probability breakdown for one charm
    ///
    /// # Arguments
    /// * `charm_json` - `{"rarity": "RARE[7]", "groups": [3, 6, 5]}`
    /// * `selection_json` - `{"slots": [[{"name": ..., "level": ...}]], "slotPattern": "W-1-0"}`
    #[wasm_bindgen(js_name = computeCharmProbability)]
    pub fn compute_charm_probability(
        &self,
        charm_json: &str,
        selection_json: &str,
    ) -> Result<String, JsValue> {
        let charm: CharmDescriptor = serde_json::from_str(charm_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid charm: {}", e)))?;
        let selection = parse_selection(selection_json)?;
        let result = compute_charm_probability(&self.tables, &charm, &selection);
        serde_json::to_string(&result)
            .map_err(|e| JsValue::from_str(&format!("Serialize failed: {}", e)))
    }

    /// Every charm shape able to carry the selection, most likely first
    #[wasm_bindgen(js_name = rankCharms)]
    pub fn rank_charms(&self, selection_json: &str, rarity: Option<String>) -> Result<String, JsValue> {
        let selection = parse_selection(selection_json)?;
        let ranking = rank_charms(&self.tables, &selection, rarity.as_deref());
        serde_json::to_string(&ranking)
            .map_err(|e| JsValue::from_str(&format!("Serialize failed: {}", e)))
    }

    /// Data integrity findings as JSON
    #[wasm_bindgen(js_name = integrityReport)]
    pub fn integrity_report(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.tables.integrity_report())
            .map_err(|e| JsValue::from_str(&format!("Serialize failed: {}", e)))
    }

    #[wasm_bindgen(js_name = rarityIds)]
    pub fn rarity_ids(&self) -> Vec<String> {
        self.tables.rarities().iter().map(|r| r.id.clone()).collect()
    }
}

fn parse_selection(json: &str) -> Result<SelectionState, JsValue> {
    let raw: SelectionState = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid selection: {}", e)))?;
    let pattern = raw.slot_pattern;
    let mut selection = SelectionState::new(raw.slots);
    selection.slot_pattern = pattern;
    Ok(selection)
}
