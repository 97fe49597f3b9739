//! Diffusion matrices of the linear layer.
//!
//! One fixed layout per branch count, with entries built from the field
//! generator `g`. For two to four branches the matrices are MDS.

use super::params::Branches;
use crate::error::AnemoiResult;
use crate::field::{Fp, PrimeField};

/// The `n × n` diffusion matrix (2×2 swap matrix for one branch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffusionMatrix {
    rows: Vec<Vec<Fp>>,
}

impl DiffusionMatrix {
    /// Build the matrix for a branch count and generator.
    pub fn generate(field: &PrimeField, branches: Branches, g: &Fp) -> Self {
        let one = field.one();
        let g2 = field.square(g);
        let g_plus_1 = field.add(g, &one);

        let rows = match branches {
            Branches::One => vec![vec![field.zero(), one.clone()], vec![one, field.zero()]],
            Branches::Two => vec![
                vec![one.clone(), g.clone()],
                vec![g.clone(), field.add(&g2, &one)],
            ],
            Branches::Three => vec![
                vec![g_plus_1.clone(), one.clone(), g_plus_1],
                vec![one.clone(), one.clone(), g.clone()],
                vec![g.clone(), one.clone(), one],
            ],
            Branches::Four => {
                let two_g_plus_1 = field.add(&field.add(g, g), &one);
                vec![
                    vec![one.clone(), g2.clone(), g2.clone(), g_plus_1.clone()],
                    vec![g_plus_1.clone(), field.add(g, &g2), g2, two_g_plus_1.clone()],
                    vec![g.clone(), g_plus_1.clone(), one, g.clone()],
                    vec![g.clone(), two_g_plus_1, g_plus_1.clone(), g_plus_1],
                ]
            }
        };

        Self { rows }
    }

    /// Build the matrix from a numeric branch count.
    pub fn for_branch_count(field: &PrimeField, branches: usize, g: &Fp) -> AnemoiResult<Self> {
        Ok(Self::generate(field, Branches::try_from(branches)?, g))
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.rows.len()
    }

    /// Rows, outer index = row.
    pub fn rows(&self) -> &[Vec<Fp>] {
        &self.rows
    }

    /// Row vector times matrix: `out[col] = Σ_row v[row] * M[row][col]`.
    pub fn mul_row_vector(&self, field: &PrimeField, v: &[Fp]) -> Vec<Fp> {
        (0..self.dim())
            .map(|col| {
                v.iter()
                    .zip(&self.rows)
                    .fold(field.zero(), |acc, (v_row, m_row)| {
                        field.add(&acc, &field.mul(v_row, &m_row[col]))
                    })
            })
            .collect()
    }

    /// Determinant over the field.
    pub fn determinant(&self, field: &PrimeField) -> Fp {
        let all: Vec<usize> = (0..self.dim()).collect();
        minor_determinant(field, &self.rows, &all, &all)
    }

    /// Returns true if the matrix is non-singular.
    pub fn is_invertible(&self, field: &PrimeField) -> bool {
        !self.determinant(field).is_zero()
    }

    /// Returns true if every square submatrix is non-singular.
    pub fn is_mds(&self, field: &PrimeField) -> bool {
        let n = self.dim();
        let subsets: Vec<Vec<usize>> = (1u32..(1 << n))
            .map(|mask| (0..n).filter(|i| mask & (1 << i) != 0).collect())
            .collect();

        subsets.iter().all(|rows| {
            subsets
                .iter()
                .filter(|cols| cols.len() == rows.len())
                .all(|cols| !minor_determinant(field, &self.rows, rows, cols).is_zero())
        })
    }
}

/// Determinant of the submatrix selected by `rows` × `cols`, by cofactor
/// expansion along the first selected row.
fn minor_determinant(field: &PrimeField, m: &[Vec<Fp>], rows: &[usize], cols: &[usize]) -> Fp {
    match rows.len() {
        0 => field.one(),
        1 => m[rows[0]][cols[0]].clone(),
        _ => {
            let (first, rest) = (rows[0], &rows[1..]);
            cols.iter().enumerate().fold(field.zero(), |acc, (k, &col)| {
                let remaining: Vec<usize> = cols.iter().copied().filter(|&c| c != col).collect();
                let term = field.mul(&m[first][col], &minor_determinant(field, m, rest, &remaining));
                if k % 2 == 0 {
                    field.add(&acc, &term)
                } else {
                    field.sub(&acc, &term)
                }
            })
        }
    }
}
