// SPDX-License-Identifier: Apache-2.0

//! Exhaustively checks the lowered add/sub/increment networks against integer
//! arithmetic for every small combination of operand widths, signedness and
//! result width.

use test_case::test_case;

use adder_lower::chain::{lower, ArithOp, OpDescriptor};
use adder_lower::gate_sim;
use adder_lower::integrity::{check_lowered, IntegritySummary};
use adder_lower::network::SignalAllocator;
use adder_lower::operand::Operand;
use adder_lower::Constants;

const MAX_OPERAND_WIDTH: usize = 4;
const MAX_RESULT_WIDTH: usize = 6;

/// Interprets the low `width` bits of `raw` as the operand's integer value.
fn extend(raw: u64, width: usize, signed: bool) -> i128 {
    let value = raw as i128;
    if signed && (raw >> (width - 1)) & 1 == 1 {
        value - (1i128 << width)
    } else {
        value
    }
}

fn truncate(value: i128, width: usize) -> u64 {
    (value.rem_euclid(1i128 << width)) as u64
}

fn setup() -> (SignalAllocator, Constants) {
    let allocator = SignalAllocator::new();
    let constants = allocator.fresh_constants();
    (allocator, constants)
}

fn check_binary(make_op: fn(Operand, Operand) -> ArithOp, reference: fn(i128, i128) -> i128) {
    let _ = env_logger::builder().is_test(true).try_init();
    for a_width in 1..=MAX_OPERAND_WIDTH {
        for b_width in 1..=MAX_OPERAND_WIDTH {
            for (a_signed, b_signed) in [(false, false), (false, true), (true, false), (true, true)]
            {
                for result_width in 1..=MAX_RESULT_WIDTH {
                    let (allocator, constants) = setup();
                    let descriptor = OpDescriptor {
                        op: make_op(
                            Operand::fresh(&allocator, a_width, a_signed),
                            Operand::fresh(&allocator, b_width, b_signed),
                        ),
                        result_width,
                    };
                    let network = lower(&descriptor, &constants, &allocator).unwrap();
                    assert_eq!(
                        check_lowered(&descriptor, &network, &constants),
                        IntegritySummary::Clean
                    );
                    for a in 0..(1u64 << a_width) {
                        for b in 0..(1u64 << b_width) {
                            let want = truncate(
                                reference(
                                    extend(a, a_width, a_signed),
                                    extend(b, b_width, b_signed),
                                ),
                                result_width,
                            );
                            let got =
                                gate_sim::simulate(&descriptor, &network, &constants, a, b)
                                    .unwrap();
                            assert_eq!(
                                got, want,
                                "{:?} a={} (w={} s={}) b={} (w={} s={}) result_width={}",
                                descriptor.op.kind(),
                                a,
                                a_width,
                                a_signed,
                                b,
                                b_width,
                                b_signed,
                                result_width
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_add_matches_integer_add() {
    check_binary(|a, b| ArithOp::Add { a, b }, |a, b| a + b);
}

#[test]
fn test_subtract_matches_integer_subtract() {
    check_binary(|a, b| ArithOp::Subtract { a, b }, |a, b| a - b);
}

#[test_case(false; "unsigned")]
#[test_case(true; "signed")]
fn test_increment_matches_add_of_literal_one(signed: bool) {
    let _ = env_logger::builder().is_test(true).try_init();
    for a_width in 1..=MAX_OPERAND_WIDTH + 1 {
        for result_width in 1..=MAX_RESULT_WIDTH {
            let (allocator, constants) = setup();
            let a = Operand::fresh(&allocator, a_width, signed);
            let literal = Operand::fresh(&allocator, 1, false);
            let increment = OpDescriptor {
                op: ArithOp::Increment {
                    a: a.clone(),
                    literal: Some(literal.clone()),
                },
                result_width,
            };
            let add = OpDescriptor {
                op: ArithOp::Add {
                    a: a.clone(),
                    b: literal.clone(),
                },
                result_width,
            };
            let inc_network = lower(&increment, &constants, &allocator).unwrap();
            let add_network = lower(&add, &constants, &allocator).unwrap();
            assert_eq!(
                check_lowered(&increment, &inc_network, &constants),
                IntegritySummary::Clean
            );
            for value in 0..(1u64 << a_width) {
                let want = truncate(extend(value, a_width, signed) + 1, result_width);
                let got_inc =
                    gate_sim::simulate(&increment, &inc_network, &constants, value, 0).unwrap();
                let got_add =
                    gate_sim::simulate(&add, &add_network, &constants, value, 1).unwrap();
                assert_eq!(got_inc, want, "a={} w={} rw={}", value, a_width, result_width);
                assert_eq!(got_inc, got_add, "a={} w={} rw={}", value, a_width, result_width);
            }
        }
    }
}

#[test]
fn test_increment_without_literal_uses_logic_one() {
    let (allocator, constants) = setup();
    let descriptor = OpDescriptor {
        op: ArithOp::Increment {
            a: Operand::fresh(&allocator, 3, false),
            literal: None,
        },
        result_width: 3,
    };
    let network = lower(&descriptor, &constants, &allocator).unwrap();
    for value in 0..8u64 {
        assert_eq!(
            gate_sim::simulate(&descriptor, &network, &constants, value, 0).unwrap(),
            (value + 1) % 8
        );
    }
}
