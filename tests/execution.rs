use wspace::asm;
use wspace::executor::{Executor, RuntimeError};
use wspace::parser;

/// Assemble a mnemonic program, tokenize the generated Whitespace
/// and run it against the given input, returning whatever it wrote.
fn run(source: &str, input: &str) -> String {
    match try_run(source, input) {
        Ok(output) => output,
        Err(e) => panic!("unexpected runtime error: {e}"),
    }
}

/// As `run`, but the program is expected to fault.
fn run_err(source: &str, input: &str) -> RuntimeError {
    match try_run(source, input) {
        Ok(output) => panic!("expected a fault, but program wrote {output:?}"),
        Err(e) => e,
    }
}

fn try_run(source: &str, input: &str) -> Result<String, RuntimeError> {
    let program = asm::parse(source).unwrap();
    let code = asm::assemble(&program);
    let tokens = parser::parse(&code).unwrap();
    let mut output = Vec::new();
    let mut executor = Executor::new(tokens, input.as_bytes(), &mut output);
    executor.run()?;
    Ok(String::from_utf8(output).unwrap())
}

// ===================================================================
// End-to-end scenarios
// ===================================================================

#[test]
fn arithmetic_pipeline() {
    let source = "
        PUSH 8
        PUSH -2
        ADD
        DUPLICATE
        OUTNUM
        PUSH -5
        SUB
        DUPLICATE
        OUTNUM
        PUSH 3
        MULT
        DUPLICATE
        OUTNUM
        PUSH 2
        DIV
        DUPLICATE
        OUTNUM
        PUSH 7
        MOD
        DUPLICATE
        OUTNUM
        DUPLICATE
        DIV
        OUTNUM
        ENDPROGRAM
    ";
    assert_eq!(run(source, ""), "611331621");
}

#[test]
fn stack_reshaping() {
    let source = "
        PUSH 7
        PUSH 16
        PUSH 20
        PUSH 25
        PUSH 31
        COPY 3
        DUPLICATE
        OUTNUM
        SWAP
        DUPLICATE
        OUTNUM
        DISCARD
        DUPLICATE
        OUTNUM
        SLIDE 3
        MULT
        OUTNUM
        ENDPROGRAM
    ";
    assert_eq!(run(source, ""), "163116112");
}

#[test]
fn control_flow_with_subroutine() {
    let source = "
        PUSH 65
        OUTCH
        CALL TS
        PUSH 66
        OUTCH
        ENDPROGRAM
        MARK TS
        PUSH 32
        OUTCH
        RETURN
    ";
    assert_eq!(run(source, ""), "A B");
}

#[test]
fn conditional_jump_skips_output() {
    let source = "
        PUSH 0
        JUMPZERO SS
        PUSH 99
        OUTNUM
        MARK SS
        ENDPROGRAM
    ";
    assert_eq!(run(source, ""), "");
}

#[test]
fn heap_round_trip() {
    let source = "
        PUSH 10
        PUSH 42
        STORE
        PUSH 10
        RETRIEVE
        OUTNUM
        ENDPROGRAM
    ";
    assert_eq!(run(source, ""), "42");
}

#[test]
fn input_echo() {
    let source = "
        PUSH 100
        INCH
        PUSH 100
        RETRIEVE
        OUTCH
        ENDPROGRAM
    ";
    assert_eq!(run(source, "x"), "x");
}

// ===================================================================
// Laws
// ===================================================================

#[test]
fn push_then_discard_leaves_stack_unchanged() {
    let source = "
        PUSH 1
        PUSH 7
        DISCARD
        OUTNUM
        ENDPROGRAM
    ";
    assert_eq!(run(source, ""), "1");
}

#[test]
fn push_duplicate_add_doubles() {
    let source = "
        PUSH 21
        DUPLICATE
        ADD
        OUTNUM
        ENDPROGRAM
    ";
    assert_eq!(run(source, ""), "42");
}

#[test]
fn swap_twice_is_identity() {
    let source = "
        PUSH 1
        PUSH 2
        SWAP
        SWAP
        OUTNUM
        OUTNUM
        ENDPROGRAM
    ";
    assert_eq!(run(source, ""), "21");
}

#[test]
fn copy_preserves_items_below_the_top() {
    let source = "
        PUSH 1
        PUSH 2
        PUSH 3
        COPY 2
        OUTNUM
        OUTNUM
        OUTNUM
        OUTNUM
        ENDPROGRAM
    ";
    assert_eq!(run(source, ""), "1321");
}

#[test]
fn call_returns_to_instruction_after_call() {
    // The subroutine is re-entered once via a plain jump as well, to
    // check that the return chain is a real stack of addresses.
    let source = "
        CALL T
        PUSH 51
        OUTCH
        CALL T
        PUSH 52
        OUTCH
        ENDPROGRAM
        MARK T
        PUSH 48
        OUTCH
        RETURN
    ";
    assert_eq!(run(source, ""), "03040");
}

// ===================================================================
// Boundary behaviors
// ===================================================================

#[test]
fn floored_division_and_modulo() {
    let source = "
        PUSH -7
        PUSH 2
        DIV
        OUTNUM
        PUSH -7
        PUSH 2
        MOD
        OUTNUM
        PUSH 7
        PUSH -2
        DIV
        OUTNUM
        PUSH 7
        PUSH -2
        MOD
        OUTNUM
        ENDPROGRAM
    ";
    assert_eq!(run(source, ""), "-41-4-1");
}

#[test]
fn slide_zero_only_touches_the_top() {
    let source = "
        PUSH 1
        PUSH 2
        SLIDE 0
        OUTNUM
        OUTNUM
        ENDPROGRAM
    ";
    assert_eq!(run(source, ""), "21");
}

#[test]
fn empty_label_is_a_valid_target() {
    let source = "
        JUMP
        PUSH 99
        OUTNUM
        MARK
        ENDPROGRAM
    ";
    assert_eq!(run(source, ""), "");
}

#[test]
fn duplicate_marks_collapse_to_the_last() {
    let source = "
        JUMP TT
        MARK TT
        PUSH 1
        OUTNUM
        ENDPROGRAM
        MARK TT
        PUSH 2
        OUTNUM
        ENDPROGRAM
    ";
    assert_eq!(run(source, ""), "2");
}

#[test]
fn innum_takes_one_token_and_discards_the_line() {
    let source = "
        PUSH 0
        INNUM
        PUSH 1
        INCH
        PUSH 1
        RETRIEVE
        OUTCH
        PUSH 0
        RETRIEVE
        OUTNUM
        ENDPROGRAM
    ";
    // The character read lands on the line after the number; the
    // junk trailing the number is never seen.
    assert_eq!(run(source, "42 junk\nZ\n"), "Z42");
}

#[test]
fn inch_skips_empty_lines() {
    let source = "
        PUSH 0
        INCH
        PUSH 0
        RETRIEVE
        OUTCH
        ENDPROGRAM
    ";
    assert_eq!(run(source, "\n\nq\n"), "q");
}

// ===================================================================
// Faults
// ===================================================================

#[test]
fn division_by_zero_faults() {
    let source = "
        PUSH 1
        PUSH 0
        DIV
        ENDPROGRAM
    ";
    assert!(matches!(run_err(source, ""), RuntimeError::DivisionByZero));
}

#[test]
fn modulo_by_zero_faults() {
    let source = "
        PUSH 1
        PUSH 0
        MOD
        ENDPROGRAM
    ";
    assert!(matches!(run_err(source, ""), RuntimeError::DivisionByZero));
}

#[test]
fn copy_needs_depth_greater_than_its_argument() {
    let source = "
        PUSH 5
        COPY 1
        ENDPROGRAM
    ";
    assert!(matches!(run_err(source, ""), RuntimeError::StackUnderflow));
}

#[test]
fn copy_rejects_negative_arguments() {
    let source = "
        PUSH 5
        PUSH 6
        COPY -1
        ENDPROGRAM
    ";
    assert!(matches!(
        run_err(source, ""),
        RuntimeError::NegativeArgument(-1)
    ));
}

#[test]
fn slide_past_the_bottom_faults() {
    let source = "
        PUSH 1
        SLIDE 3
        ENDPROGRAM
    ";
    assert!(matches!(run_err(source, ""), RuntimeError::StackUnderflow));
}

#[test]
fn arithmetic_on_a_short_stack_faults() {
    let source = "
        PUSH 1
        ADD
        ENDPROGRAM
    ";
    assert!(matches!(run_err(source, ""), RuntimeError::StackUnderflow));
}

#[test]
fn store_outside_the_heap_faults() {
    let source = "
        PUSH 512
        PUSH 1
        STORE
        ENDPROGRAM
    ";
    assert!(matches!(
        run_err(source, ""),
        RuntimeError::BadHeapAddress(512)
    ));
}

#[test]
fn retrieve_at_a_negative_address_faults() {
    let source = "
        PUSH -1
        RETRIEVE
        ENDPROGRAM
    ";
    assert!(matches!(
        run_err(source, ""),
        RuntimeError::BadHeapAddress(-1)
    ));
}

#[test]
fn jump_to_an_unbound_label_faults() {
    let source = "
        JUMP TTT
        ENDPROGRAM
    ";
    assert!(matches!(run_err(source, ""), RuntimeError::UnboundLabel(_)));
}

#[test]
fn return_without_a_call_faults() {
    let source = "
        RETURN
        ENDPROGRAM
    ";
    assert!(matches!(run_err(source, ""), RuntimeError::StackUnderflow));
}

#[test]
fn running_off_the_end_faults() {
    let source = "
        PUSH 1
    ";
    assert!(matches!(run_err(source, ""), RuntimeError::RanOffEnd));
}

#[test]
fn malformed_number_on_input_faults() {
    let source = "
        PUSH 0
        INNUM
        ENDPROGRAM
    ";
    assert!(matches!(
        run_err(source, "abc\n"),
        RuntimeError::MalformedNumber(_)
    ));
}

#[test]
fn reading_past_end_of_input_faults() {
    let source = "
        PUSH 0
        INCH
        ENDPROGRAM
    ";
    assert!(matches!(run_err(source, ""), RuntimeError::OutOfInput));
}

#[test]
fn outch_rejects_invalid_code_points() {
    let source = "
        PUSH -1
        OUTCH
        ENDPROGRAM
    ";
    assert!(matches!(run_err(source, ""), RuntimeError::BadCodepoint(-1)));
}

#[test]
fn heap_size_is_configurable() {
    let program = asm::parse(
        "
        PUSH 512
        PUSH 7
        STORE
        PUSH 512
        RETRIEVE
        OUTNUM
        ENDPROGRAM
    ",
    )
    .unwrap();
    let tokens = parser::parse(&asm::assemble(&program)).unwrap();
    let mut output = Vec::new();
    let mut executor = Executor::with_heap_size(tokens, 1024, &b""[..], &mut output);
    executor.run().unwrap();
    assert_eq!(executor.heap().len(), 1024);
    assert_eq!(executor.heap().load(512), Some(7));
    assert_eq!(executor.stack().depth(), 0);
    assert_eq!(String::from_utf8(output).unwrap(), "7");
}
