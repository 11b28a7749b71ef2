//! L-system definitions.
//!
//! A [`Definition`] holds everything the pipeline needs: the axiom, the
//! production rules and the turtle parameters. It is validated once, when
//! built, and never changes afterwards.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::color::Palette;
use crate::rewrite::{self, RewriteError};
use crate::turtle::TurtleParams;

/// Configuration errors, raised while building a [`Definition`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error("axiom is missing")]
    MissingAxiom,
    #[error("rule key {0:?} must be exactly one symbol")]
    RuleKey(String),
    #[error("symbol color key {0:?} must be exactly one symbol")]
    ColorKey(String),
    #[error("stepLength must be a positive finite number, got {0}")]
    StepLength(f64),
    #[error("angleIncrement must be a finite number, got {0}")]
    AngleIncrement(f64),
}

/// A validated, immutable L-system definition.
///
/// ## Rust Lesson #8: Private Fields
///
/// Unlike `Point`, the fields here are private. Outside code can only get a
/// `Definition` through [`DefinitionBuilder::build`], so every value that
/// exists has passed validation. Getters hand out read-only views.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    name: String,
    axiom: String,
    rules: BTreeMap<char, String>,
    step_length: f64,
    angle_increment: f64,
    iterations: u32,
    all_letter_forward: bool,
    symbol_colors: BTreeMap<char, String>,
}

impl Definition {
    pub const DEFAULT_NAME: &'static str = "unknown";
    pub const DEFAULT_STEP_LENGTH: f64 = 1.0;
    pub const DEFAULT_ANGLE_INCREMENT: f64 = 90.0;
    pub const DEFAULT_ITERATIONS: u32 = 1;

    /// Start building a definition from its axiom.
    pub fn builder(axiom: impl Into<String>) -> DefinitionBuilder {
        DefinitionBuilder::new().axiom(axiom)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    pub fn rules(&self) -> &BTreeMap<char, String> {
        &self.rules
    }

    pub fn step_length(&self) -> f64 {
        self.step_length
    }

    pub fn angle_increment(&self) -> f64 {
        self.angle_increment
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn all_letter_forward(&self) -> bool {
        self.all_letter_forward
    }

    pub fn symbol_colors(&self) -> &BTreeMap<char, String> {
        &self.symbol_colors
    }

    /// Assemble a definition from known-good parts (built-in presets).
    pub(crate) fn from_parts(
        name: &str,
        axiom: &str,
        rules: &[(char, &str)],
        angle_increment: f64,
        iterations: u32,
        all_letter_forward: bool,
        symbol_colors: &[(char, &str)],
    ) -> Definition {
        let owned = |pairs: &[(char, &str)]| -> BTreeMap<char, String> {
            pairs.iter().map(|&(c, s)| (c, s.to_string())).collect()
        };
        Definition {
            name: name.to_string(),
            axiom: axiom.to_string(),
            rules: owned(rules),
            step_length: Self::DEFAULT_STEP_LENGTH,
            angle_increment,
            iterations,
            all_letter_forward,
            symbol_colors: owned(symbol_colors),
        }
    }

    /// Same definition with a different iteration count.
    pub fn with_iterations(&self, iterations: u32) -> Definition {
        Definition { iterations, ..self.clone() }
    }

    /// True when both definitions produce the same scene.
    ///
    /// Everything except the display name takes part.
    pub fn same_geometry(&self, other: &Definition) -> bool {
        self.axiom == other.axiom
            && self.rules == other.rules
            && self.step_length.to_bits() == other.step_length.to_bits()
            && self.angle_increment.to_bits() == other.angle_increment.to_bits()
            && self.iterations == other.iterations
            && self.all_letter_forward == other.all_letter_forward
            && self.symbol_colors == other.symbol_colors
    }

    /// Turtle parameters with the color specs resolved.
    pub fn turtle_params(&self) -> TurtleParams {
        TurtleParams {
            step_length: self.step_length,
            angle_increment: self.angle_increment,
            all_letter_forward: self.all_letter_forward,
            palette: Palette::from_specs(&self.symbol_colors),
        }
    }

    /// Rewrite the axiom for the configured number of iterations.
    pub fn expand(&self) -> String {
        rewrite::rewrite(&self.axiom, &self.rules, self.iterations)
    }

    /// Like [`Definition::expand`], but stops once the string would grow
    /// beyond `limit` symbols.
    pub fn expand_bounded(&self, limit: usize) -> Result<String, RewriteError> {
        rewrite::rewrite_bounded(&self.axiom, &self.rules, self.iterations, limit)
    }
}

/// Builder for [`Definition`], mirroring how definitions are authored:
/// rule and color keys arrive as strings and are checked on `build`.
#[derive(Debug, Clone)]
pub struct DefinitionBuilder {
    name: String,
    axiom: Option<String>,
    rules: Vec<(String, String)>,
    step_length: f64,
    angle_increment: f64,
    iterations: u32,
    all_letter_forward: bool,
    symbol_colors: Vec<(String, String)>,
}

impl Default for DefinitionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionBuilder {
    pub fn new() -> Self {
        Self {
            name: Definition::DEFAULT_NAME.to_string(),
            axiom: None,
            rules: Vec::new(),
            step_length: Definition::DEFAULT_STEP_LENGTH,
            angle_increment: Definition::DEFAULT_ANGLE_INCREMENT,
            iterations: Definition::DEFAULT_ITERATIONS,
            all_letter_forward: true,
            symbol_colors: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn axiom(mut self, axiom: impl Into<String>) -> Self {
        self.axiom = Some(axiom.into());
        self
    }

    /// Add a production rule. A later rule for the same symbol replaces
    /// the earlier one.
    pub fn rule(mut self, symbol: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.rules.push((symbol.into(), replacement.into()));
        self
    }

    pub fn step_length(mut self, step_length: f64) -> Self {
        self.step_length = step_length;
        self
    }

    pub fn angle_increment(mut self, degrees: f64) -> Self {
        self.angle_increment = degrees;
        self
    }

    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn all_letter_forward(mut self, enabled: bool) -> Self {
        self.all_letter_forward = enabled;
        self
    }

    pub fn symbol_color(mut self, symbol: impl Into<String>, spec: impl Into<String>) -> Self {
        self.symbol_colors.push((symbol.into(), spec.into()));
        self
    }

    /// Validate and freeze the definition.
    pub fn build(self) -> Result<Definition, DefinitionError> {
        let axiom = self.axiom.ok_or(DefinitionError::MissingAxiom)?;

        if !(self.step_length.is_finite() && self.step_length > 0.0) {
            return Err(DefinitionError::StepLength(self.step_length));
        }
        if !self.angle_increment.is_finite() {
            return Err(DefinitionError::AngleIncrement(self.angle_increment));
        }

        let rules = keyed_by_symbol(self.rules, DefinitionError::RuleKey)?;
        let symbol_colors = keyed_by_symbol(self.symbol_colors, DefinitionError::ColorKey)?;

        Ok(Definition {
            name: self.name,
            axiom,
            rules,
            step_length: self.step_length,
            angle_increment: self.angle_increment,
            iterations: self.iterations,
            all_letter_forward: self.all_letter_forward,
            symbol_colors,
        })
    }
}

/// Turn `(key, value)` pairs into a map keyed by the key's single char.
fn keyed_by_symbol(
    pairs: Vec<(String, String)>,
    on_bad_key: fn(String) -> DefinitionError,
) -> Result<BTreeMap<char, String>, DefinitionError> {
    let mut map = BTreeMap::new();
    for (key, value) in pairs {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => {
                map.insert(symbol, value);
            }
            _ => return Err(on_bad_key(key)),
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let def = Definition::builder("F").build().unwrap();
        assert_eq!(def.name(), "unknown");
        assert_eq!(def.axiom(), "F");
        assert_eq!(def.step_length(), 1.0);
        assert_eq!(def.angle_increment(), 90.0);
        assert_eq!(def.iterations(), 1);
        assert!(def.all_letter_forward());
        assert!(def.rules().is_empty());
    }

    #[test]
    fn empty_axiom_is_allowed() {
        let def = Definition::builder("").build().unwrap();
        assert_eq!(def.expand(), "");
    }

    #[test]
    fn missing_axiom_is_rejected() {
        let err = DefinitionBuilder::new().rule("F", "FF").build().unwrap_err();
        assert_eq!(err, DefinitionError::MissingAxiom);
    }

    #[test]
    fn multi_symbol_rule_key_is_rejected() {
        let err = Definition::builder("F").rule("FF", "F").build().unwrap_err();
        assert_eq!(err, DefinitionError::RuleKey("FF".to_string()));
        assert!(err.to_string().contains("\"FF\""));
    }

    #[test]
    fn empty_rule_key_is_rejected() {
        let err = Definition::builder("F").rule("", "F").build().unwrap_err();
        assert_eq!(err, DefinitionError::RuleKey(String::new()));
    }

    #[test]
    fn multi_symbol_color_key_is_rejected() {
        let err = Definition::builder("F").symbol_color("AB", "red").build().unwrap_err();
        assert_eq!(err, DefinitionError::ColorKey("AB".to_string()));
    }

    #[test]
    fn non_ascii_single_symbol_keys_are_fine() {
        let def = Definition::builder("λ").rule("λ", "λF").build().unwrap();
        assert_eq!(def.rules().get(&'λ').map(String::as_str), Some("λF"));
    }

    #[test]
    fn bad_step_length_is_rejected() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Definition::builder("F").step_length(step).build().unwrap_err();
            assert!(matches!(err, DefinitionError::StepLength(_)), "step {step} accepted");
        }
    }

    #[test]
    fn non_finite_angle_is_rejected() {
        let err = Definition::builder("F").angle_increment(f64::NAN).build().unwrap_err();
        assert!(matches!(err, DefinitionError::AngleIncrement(_)));
    }

    #[test]
    fn later_rule_replaces_earlier() {
        let def = Definition::builder("F").rule("F", "FF").rule("F", "F+F").build().unwrap();
        assert_eq!(def.rules().len(), 1);
        assert_eq!(def.rules()[&'F'], "F+F");
    }

    #[test]
    fn same_geometry_ignores_name() {
        let a = Definition::builder("F").name("a").rule("F", "FF").build().unwrap();
        let b = Definition::builder("F").name("b").rule("F", "FF").build().unwrap();
        assert!(a.same_geometry(&b));
        assert!(!a.same_geometry(&a.with_iterations(3)));
    }

    #[test]
    fn turtle_params_resolve_colors() {
        let def = Definition::builder("F")
            .symbol_color("F", "#ff0000")
            .angle_increment(60.0)
            .build()
            .unwrap();
        let params = def.turtle_params();
        assert_eq!(params.angle_increment, 60.0);
        assert_eq!(params.palette.color_for('F'), crate::Color::rgb(255, 0, 0));
    }
}
