//! Property-based tests for ripple-carry arithmetic on wider registers.

use proptest::prelude::*;
use ripple_arith::RippleCarry;

/// Register widths, flags, and operands that fit them.
fn arb_case() -> impl Strategy<Value = (RippleCarry, usize, bool, u64, u64)> {
    (1_usize..=16, 1_usize..=16, any::<bool>(), any::<bool>()).prop_flat_map(
        |(a_len, b_len, overflow, little_endian)| {
            let rc = RippleCarry::new(a_len, b_len)
                .with_overflow(overflow)
                .with_little_endian(little_endian);
            (
                Just(rc),
                Just(b_len),
                Just(overflow),
                0..1u64 << a_len,
                0..1u64 << b_len,
            )
        },
    )
}

fn wrap(value: i128, width: usize) -> u64 {
    value.rem_euclid(1i128 << width) as u64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn adder_adds((rc, b_len, overflow, a, b) in arb_case()) {
        let eval = rc.adder().unwrap().evaluate(a, b).unwrap();
        let width = b_len + usize::from(overflow);
        prop_assert_eq!(eval.output, wrap(i128::from(a) + i128::from(b), width));
        prop_assert_eq!(eval.a, a);
        prop_assert!(eval.ancilla_clean);
    }

    #[test]
    fn subtractor_subtracts((rc, b_len, overflow, a, b) in arb_case()) {
        let eval = rc.subtractor().unwrap().evaluate(a, b).unwrap();
        let width = b_len + usize::from(overflow);
        prop_assert_eq!(eval.output, wrap(i128::from(a) - i128::from(b), width));
        prop_assert_eq!(eval.a, a);
        prop_assert!(eval.ancilla_clean);
    }

    #[test]
    fn comparator_compares((rc, _b_len, _overflow, a, b) in arb_case()) {
        let eval = rc.comparator().unwrap().evaluate(a, b).unwrap();
        prop_assert_eq!(eval.carry_out, Some(a < b));
        prop_assert_eq!((eval.a, eval.b), (a, b));
        prop_assert!(eval.ancilla_clean);
    }

    #[test]
    fn adjoint_undoes_adder((rc, _b_len, _overflow, a, b) in arb_case()) {
        let adder = rc.adder().unwrap();
        let forward = adder.evaluate(a, b).unwrap();

        let undo = adder.adjoint();
        let layout = &undo.layout;
        let mut state = ripple_ir::BitState::for_circuit(&undo.circuit);
        state.write_uint(&layout.a, forward.a, layout.little_endian).unwrap();
        state.write_uint(&layout.b, forward.b, layout.little_endian).unwrap();
        if let (Some(line), Some(bit)) = (layout.carry_out, forward.carry_out) {
            state.set(line, bit).unwrap();
        }
        state.run(&undo.circuit).unwrap();
        prop_assert_eq!(state.read_uint(&layout.b, layout.little_endian).unwrap(), b);
        if let Some(line) = layout.carry_out {
            prop_assert!(!state.get(line).unwrap());
        }
    }
}
