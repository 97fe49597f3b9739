//! Vector-file conformance tests.
//!
//! Runs every entry of `tests/vectors/jive_vectors.json` through the
//! permutation and Jive, reporting all mismatches before failing.

use anemoi_jive::anemoi::{Anemoi, AnemoiParams, State, ThreeBranchMixing};
use anemoi_jive::field::{Fp, PrimeField};
use serde::Deserialize;
use std::path::Path;

const VECTORS_PATH: &str = "tests/vectors/jive_vectors.json";

#[derive(Debug, Deserialize)]
struct VectorFile {
    field: String,
    generator: u64,
    vectors: Vec<Vector>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Mixing {
    Reference,
    Corrected,
}

impl From<&Mixing> for ThreeBranchMixing {
    fn from(m: &Mixing) -> Self {
        match m {
            Mixing::Reference => ThreeBranchMixing::Reference,
            Mixing::Corrected => ThreeBranchMixing::Corrected,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Vector {
    name: String,
    branches: usize,
    alpha: u64,
    mixing: Mixing,
    x: Vec<String>,
    y: Vec<String>,
    #[serde(default)]
    permute_x: Option<Vec<String>>,
    #[serde(default)]
    permute_y: Option<Vec<String>>,
    compress: String,
}

fn load() -> VectorFile {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(VECTORS_PATH);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e));
    serde_json::from_str(&text).expect("Failed to parse vector file")
}

fn field_for(name: &str) -> PrimeField {
    match name {
        "bn254" => PrimeField::bn254(),
        "bls12_381" => PrimeField::bls12_381(),
        other => panic!("Unknown field {:?}", other),
    }
}

fn parse_all(field: &PrimeField, values: &[String]) -> Vec<Fp> {
    values
        .iter()
        .map(|v| field.parse_element(v).unwrap())
        .collect()
}

#[test]
fn test_vector_file() {
    let file = load();
    let field = field_for(&file.field);
    assert!(!file.vectors.is_empty());

    let mut failures = Vec::new();
    for v in &file.vectors {
        let params = AnemoiParams::new(field.clone(), v.branches, v.alpha, file.generator)
            .unwrap()
            .with_three_branch_mixing((&v.mixing).into());
        let anemoi = Anemoi::new(params);
        let state = State::new(parse_all(&field, &v.x), parse_all(&field, &v.y));

        let out = anemoi.permute(&state).unwrap();
        if let Some(expected) = &v.permute_x {
            if out.x() != parse_all(&field, expected).as_slice() {
                failures.push(format!("{}: permute X mismatch", v.name));
            }
        }
        if let Some(expected) = &v.permute_y {
            if out.y() != parse_all(&field, expected).as_slice() {
                failures.push(format!("{}: permute Y mismatch", v.name));
            }
        }

        let digest = anemoi.compress(&state).unwrap();
        if digest.to_string() != v.compress {
            failures.push(format!(
                "{}: expected {}, actual {}",
                v.name, v.compress, digest
            ));
        }
    }

    println!("=== Vector Conformance: {} vectors ===", file.vectors.len());
    for f in &failures {
        println!("  {}", f);
    }
    assert!(failures.is_empty(), "{} vector(s) failed", failures.len());
}

#[test]
fn test_vector_names_unique() {
    let file = load();
    let mut names: Vec<&str> = file.vectors.iter().map(|v| v.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), file.vectors.len());
}
