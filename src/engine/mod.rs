// Evaluation engine — trait-based abstraction over both evaluation paths.
//
// RuleEvaluator runs locally and is a pure function of its inputs.
// GeminiEvaluator calls the Gemini generateContent API for contextual
// scoring. Both produce the same Evaluation shape, so callers can treat
// them polymorphically.

pub mod gemini;
pub mod rules;
pub mod traits;
