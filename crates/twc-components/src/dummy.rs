//! The dummy surface-layer kernel.
//!
//! Three free functions over caller-owned buffers, mirroring the
//! initialise / run / finalise lifecycle of a coupled component.
//! Nothing here allocates, logs or keeps state between calls; every
//! buffer is borrowed for the duration of one call only.
//!
//! # Step arithmetic
//!
//! For every cell `p`, with `a`, `b` the current-step states:
//!
//! ```text
//! a[p] = a_prev[p] + 1
//! b[p] = b_prev[p] + 2
//! i[p] = driving_a[p] + driving_b[p] + transfer_l[p] + ancillary_c[p] * a[p]
//! j[p] = driving_a[p] + driving_b[p] + driving_c[p] + transfer_k[p] + b[p]
//! x[p] = driving_a[p] + driving_b[p] + driving_c[p] + transfer_n[p] - a[p]
//! ```
//!
//! Cells are independent. Within a cell the states are updated first,
//! since the transfers and output read the current-step values.
//!
//! # Buffer lengths
//!
//! Every buffer must hold at least `shape.cell_count()` values; values
//! past that are never touched. Shorter buffers are a caller bug: debug
//! builds assert, release builds panic on the first out-of-range index.

use twc_core::GridShape;

/// Read-only buffers consumed by [`run`].
#[derive(Clone, Copy, Debug)]
pub struct DummyInputs<'a> {
    /// Inbound transfer `k`.
    pub transfer_k: &'a [f64],
    /// Inbound transfer `l`.
    pub transfer_l: &'a [f64],
    /// Inbound transfer `n`.
    pub transfer_n: &'a [f64],
    /// Driving field `a`.
    pub driving_a: &'a [f64],
    /// Driving field `b`.
    pub driving_b: &'a [f64],
    /// Driving field `c`.
    pub driving_c: &'a [f64],
    /// Ancillary field `c`.
    pub ancillary_c: &'a [f64],
    /// State `a` at the previous step.
    pub state_a_prev: &'a [f64],
    /// State `b` at the previous step.
    pub state_b_prev: &'a [f64],
}

/// Buffers written by [`run`].
#[derive(Debug)]
pub struct DummyOutputs<'a> {
    /// State `a` at the current step.
    pub state_a: &'a mut [f64],
    /// State `b` at the current step.
    pub state_b: &'a mut [f64],
    /// Outbound transfer `i`.
    pub transfer_i: &'a mut [f64],
    /// Outbound transfer `j`.
    pub transfer_j: &'a mut [f64],
    /// Output `x`.
    pub output_x: &'a mut [f64],
}

impl DummyInputs<'_> {
    fn debug_check(&self, n: usize) {
        for (name, buf) in [
            ("transfer_k", self.transfer_k),
            ("transfer_l", self.transfer_l),
            ("transfer_n", self.transfer_n),
            ("driving_a", self.driving_a),
            ("driving_b", self.driving_b),
            ("driving_c", self.driving_c),
            ("ancillary_c", self.ancillary_c),
            ("state_a_prev", self.state_a_prev),
            ("state_b_prev", self.state_b_prev),
        ] {
            debug_assert!(buf.len() >= n, "{name} holds {} values, grid has {n}", buf.len());
        }
    }
}

impl DummyOutputs<'_> {
    fn debug_check(&self, n: usize) {
        for (name, len) in [
            ("state_a", self.state_a.len()),
            ("state_b", self.state_b.len()),
            ("transfer_i", self.transfer_i.len()),
            ("transfer_j", self.transfer_j.len()),
            ("output_x", self.output_x.len()),
        ] {
            debug_assert!(len >= n, "{name} holds {len} values, grid has {n}");
        }
    }
}

/// Set the initial state: every cell of `state_a` and `state_b` to `0.0`.
///
/// The buffers' prior contents are never read.
pub fn initialise(shape: GridShape, state_a: &mut [f64], state_b: &mut [f64]) {
    let n = shape.cell_count();
    debug_assert!(state_a.len() >= n, "state_a holds {} values, grid has {n}", state_a.len());
    debug_assert!(state_b.len() >= n, "state_b holds {} values, grid has {n}", state_b.len());

    for (i, j, k) in shape.cells() {
        let p = shape.linear_index(i, j, k);
        state_a[p] = 0.0;
        state_b[p] = 0.0;
    }
}

/// Advance one timestep.
///
/// Writes only the five buffers in `outputs`; see the module docs for
/// the per-cell arithmetic.
pub fn run(shape: GridShape, inputs: &DummyInputs<'_>, outputs: &mut DummyOutputs<'_>) {
    let n = shape.cell_count();
    inputs.debug_check(n);
    outputs.debug_check(n);

    for (i, j, k) in shape.cells() {
        let p = shape.linear_index(i, j, k);

        // update states
        let a = inputs.state_a_prev[p] + 1.0;
        let b = inputs.state_b_prev[p] + 2.0;
        outputs.state_a[p] = a;
        outputs.state_b[p] = b;

        let driving_ab = inputs.driving_a[p] + inputs.driving_b[p];

        outputs.transfer_i[p] = driving_ab + inputs.transfer_l[p] + inputs.ancillary_c[p] * a;
        outputs.transfer_j[p] =
            driving_ab + inputs.driving_c[p] + inputs.transfer_k[p] + b;
        outputs.output_x[p] =
            driving_ab + inputs.driving_c[p] + inputs.transfer_n[p] - a;
    }
}

/// Release resources at the end of a run. The kernel holds none.
pub fn finalise() {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Owned buffers for one kernel call.
    #[derive(Clone, Debug, PartialEq)]
    struct Grid {
        transfer_k: Vec<f64>,
        transfer_l: Vec<f64>,
        transfer_n: Vec<f64>,
        driving_a: Vec<f64>,
        driving_b: Vec<f64>,
        driving_c: Vec<f64>,
        ancillary_c: Vec<f64>,
        state_a_prev: Vec<f64>,
        state_b_prev: Vec<f64>,
        state_a: Vec<f64>,
        state_b: Vec<f64>,
        transfer_i: Vec<f64>,
        transfer_j: Vec<f64>,
        output_x: Vec<f64>,
    }

    impl Grid {
        fn filled(n: usize, inputs: [f64; 9]) -> Self {
            Self {
                transfer_k: vec![inputs[0]; n],
                transfer_l: vec![inputs[1]; n],
                transfer_n: vec![inputs[2]; n],
                driving_a: vec![inputs[3]; n],
                driving_b: vec![inputs[4]; n],
                driving_c: vec![inputs[5]; n],
                ancillary_c: vec![inputs[6]; n],
                state_a_prev: vec![inputs[7]; n],
                state_b_prev: vec![inputs[8]; n],
                state_a: vec![f64::NAN; n],
                state_b: vec![f64::NAN; n],
                transfer_i: vec![f64::NAN; n],
                transfer_j: vec![f64::NAN; n],
                output_x: vec![f64::NAN; n],
            }
        }

        fn run(&mut self, shape: GridShape) {
            let inputs = DummyInputs {
                transfer_k: &self.transfer_k,
                transfer_l: &self.transfer_l,
                transfer_n: &self.transfer_n,
                driving_a: &self.driving_a,
                driving_b: &self.driving_b,
                driving_c: &self.driving_c,
                ancillary_c: &self.ancillary_c,
                state_a_prev: &self.state_a_prev,
                state_b_prev: &self.state_b_prev,
            };
            let mut outputs = DummyOutputs {
                state_a: &mut self.state_a,
                state_b: &mut self.state_b,
                transfer_i: &mut self.transfer_i,
                transfer_j: &mut self.transfer_j,
                output_x: &mut self.output_x,
            };
            run(shape, &inputs, &mut outputs);
        }
    }

    fn arb_shape() -> impl Strategy<Value = GridShape> {
        (0usize..4, 0usize..5, 0usize..6).prop_map(|(nz, ny, nx)| GridShape::new(nz, ny, nx))
    }

    fn arb_grid(n: usize) -> impl Strategy<Value = Grid> {
        let field = move || prop::collection::vec(-1.0e6f64..1.0e6, n);
        (
            (field(), field(), field(), field(), field()),
            (field(), field(), field(), field()),
        )
            .prop_map(
                move |(
                    (transfer_k, transfer_l, transfer_n, driving_a, driving_b),
                    (driving_c, ancillary_c, state_a_prev, state_b_prev),
                )| Grid {
                    transfer_k,
                    transfer_l,
                    transfer_n,
                    driving_a,
                    driving_b,
                    driving_c,
                    ancillary_c,
                    state_a_prev,
                    state_b_prev,
                    state_a: vec![f64::NAN; n],
                    state_b: vec![f64::NAN; n],
                    transfer_i: vec![f64::NAN; n],
                    transfer_j: vec![f64::NAN; n],
                    output_x: vec![f64::NAN; n],
                },
            )
    }

    #[test]
    fn single_cell_scenario() {
        // k, l, n, driving a, b, c, ancillary c, previous a, b
        let mut g = Grid::filled(1, [5.0, 6.0, 7.0, 1.0, 2.0, 3.0, 2.0, 0.0, 0.0]);
        g.run(GridShape::new(1, 1, 1));

        assert_eq!(g.state_a, vec![1.0]);
        assert_eq!(g.state_b, vec![2.0]);
        assert_eq!(g.transfer_i, vec![11.0]);
        assert_eq!(g.transfer_j, vec![13.0]);
        assert_eq!(g.output_x, vec![12.0]);
    }

    #[test]
    fn transfers_use_current_not_previous_state() {
        let mut g = Grid::filled(2, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 10.0, 20.0]);
        g.run(GridShape::new(1, 2, 1));

        assert_eq!(g.state_a, vec![11.0; 2]);
        assert_eq!(g.state_b, vec![22.0; 2]);
        assert_eq!(g.transfer_i, vec![33.0; 2]);
        assert_eq!(g.transfer_j, vec![22.0; 2]);
        assert_eq!(g.output_x, vec![-11.0; 2]);
    }

    #[test]
    fn run_leaves_inputs_untouched() {
        let mut g = Grid::filled(6, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let before = g.clone();
        g.run(GridShape::new(1, 2, 3));

        assert_eq!(g.transfer_k, before.transfer_k);
        assert_eq!(g.transfer_l, before.transfer_l);
        assert_eq!(g.transfer_n, before.transfer_n);
        assert_eq!(g.driving_a, before.driving_a);
        assert_eq!(g.driving_b, before.driving_b);
        assert_eq!(g.driving_c, before.driving_c);
        assert_eq!(g.ancillary_c, before.ancillary_c);
        assert_eq!(g.state_a_prev, before.state_a_prev);
        assert_eq!(g.state_b_prev, before.state_b_prev);
    }

    #[test]
    fn initialise_zeroes_states() {
        let shape = GridShape::new(2, 3, 4);
        let mut a = vec![f64::NAN; 24];
        let mut b = vec![42.0; 24];
        initialise(shape, &mut a, &mut b);
        assert!(a.iter().all(|&v| v == 0.0));
        assert!(b.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn zero_extent_grid_touches_nothing() {
        let shape = GridShape::new(3, 0, 2);

        let mut a = vec![5.0; 4];
        let mut b = vec![6.0; 4];
        initialise(shape, &mut a, &mut b);
        assert_eq!(a, vec![5.0; 4]);
        assert_eq!(b, vec![6.0; 4]);

        let mut g = Grid::filled(4, [1.0; 9]);
        let before = g.clone();
        g.run(shape);
        assert!(g.state_a.iter().all(|v| v.is_nan()));
        assert!(g.output_x.iter().all(|v| v.is_nan()));
        assert_eq!(g.driving_a, before.driving_a);

        let mut empty_a: Vec<f64> = Vec::new();
        let mut empty_b: Vec<f64> = Vec::new();
        initialise(GridShape::new(0, 0, 0), &mut empty_a, &mut empty_b);
        assert!(empty_a.is_empty() && empty_b.is_empty());

        finalise();
    }

    #[test]
    fn consecutive_steps_accumulate_state() {
        let shape = GridShape::new(1, 1, 2);
        let mut g = Grid::filled(2, [0.0; 9]);
        initialise(shape, &mut g.state_a_prev, &mut g.state_b_prev);

        for step in 1..=5 {
            g.run(shape);
            assert_eq!(g.state_a, vec![step as f64; 2]);
            assert_eq!(g.state_b, vec![2.0 * step as f64; 2]);
            // caller-side swap of current and previous
            std::mem::swap(&mut g.state_a, &mut g.state_a_prev);
            std::mem::swap(&mut g.state_b, &mut g.state_b_prev);
        }
    }

    proptest! {
        #[test]
        fn initialise_zeroes_every_cell(shape in arb_shape(), fill in -1.0e9f64..1.0e9) {
            let n = shape.cell_count();
            let mut a = vec![fill; n];
            let mut b = vec![fill; n];
            initialise(shape, &mut a, &mut b);
            prop_assert!(a.iter().chain(&b).all(|&v| v == 0.0));
        }

        #[test]
        fn run_matches_formulas_exactly(
            (shape, grid) in arb_shape().prop_flat_map(|s| (Just(s), arb_grid(s.cell_count())))
        ) {
            let mut g = grid;
            g.run(shape);
            for p in 0..shape.cell_count() {
                let a = g.state_a_prev[p] + 1.0;
                let b = g.state_b_prev[p] + 2.0;
                prop_assert_eq!(g.state_a[p], a);
                prop_assert_eq!(g.state_b[p], b);
                prop_assert_eq!(
                    g.transfer_i[p],
                    g.driving_a[p] + g.driving_b[p] + g.transfer_l[p] + g.ancillary_c[p] * a
                );
                prop_assert_eq!(
                    g.transfer_j[p],
                    g.driving_a[p] + g.driving_b[p] + g.driving_c[p] + g.transfer_k[p] + b
                );
                prop_assert_eq!(
                    g.output_x[p],
                    g.driving_a[p] + g.driving_b[p] + g.driving_c[p] + g.transfer_n[p] - a
                );
            }
        }

        #[test]
        fn run_is_repeatable(
            (shape, grid) in arb_shape().prop_flat_map(|s| (Just(s), arb_grid(s.cell_count())))
        ) {
            let mut first = grid.clone();
            let mut second = grid;
            first.run(shape);
            second.run(shape);
            second.run(shape);
            prop_assert_eq!(first, second);
        }
    }
}
