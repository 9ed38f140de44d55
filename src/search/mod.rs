//! Search pipeline stages
//!
//! Data flows strictly in this order:
//! 1. `candidates`: enumerate and score the N×P×K grid
//! 2. `constraints`: drop candidates outside the user bounds
//! 3. `pareto`: keep the non-dominated candidates
//! 4. `selection`: pick the frontier member closest to the weighted ideal point

pub mod candidates;
pub mod constraints;
pub mod pareto;
pub mod selection;

pub use candidates::{Candidate, check_grid_size, generate_candidates, generate_candidates_parallel};
pub use constraints::{apply_constraints, satisfies};
pub use pareto::{dominates, pareto_frontier, pareto_frontier_parallel};
pub use selection::{select_ideal_point, Selection, IDEAL_POINT};
