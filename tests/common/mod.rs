//! Shared payloads for integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use tempfile::TempDir;

use design_kb::AppContext;

pub fn feature(name: &str, purpose: &str) -> Value {
    json!({
        "feature": {"name": name, "purpose": purpose},
        "userStories": ["As a shopper I want to pay so that my order ships"],
        "inputs": [{
            "name": "cart",
            "dataTypeDescription": "Cart aggregate",
            "constraints": ["must not be empty"],
            "purpose": "Items to pay for"
        }],
        "outputs": [{
            "condition": "payment accepted",
            "dataDescription": "Order confirmation",
            "structureHint": {"orderId": "string"}
        }],
        "coreLogicSteps": [
            {"stepNumber": 1, "description": "Price the cart", "inputs": ["cart"], "output": "total"},
            {"stepNumber": 2, "description": "Charge the card", "inputs": ["total"], "output": "receipt"}
        ],
        "errorHandling": [],
        "nonFunctionalRequirements": [],
        "documentationNotes": ["Card data never touches our servers"]
    })
}

pub fn term(name: &str, category: &str, bounded_context: &str) -> Value {
    json!({
        "term": {"name": name, "definition": "A confirmed request to buy items", "aliases": []},
        "context": {"boundedContext": bounded_context, "scope": "Core domain"},
        "details": {
            "category": category,
            "examples": [{"scenario": "checkout", "description": "created on payment"}],
            "ambiguitiesAndBoundaries": []
        },
        "relationships": {
            "relatedTerms": [],
            "associatedFunctions": ["Checkout"]
        },
        "implementation": {"codeMapping": "sales::Order", "constraints": []}
    })
}

/// A context over a fresh document inside a temp dir
pub fn app() -> (TempDir, AppContext) {
    let dir = TempDir::new().unwrap();
    let ctx = AppContext::open(dir.path().join("design.json"));
    (dir, ctx)
}
