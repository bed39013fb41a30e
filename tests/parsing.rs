use wspace::executor::resolve_labels;
use wspace::instruction::{Instruction, Label};
use wspace::lexer;
use wspace::parser;
use wspace::parser::SyntaxError;

fn label(text: &str) -> Label {
    Label::parse(text).unwrap()
}

// ===================================================================
// Filtering
// ===================================================================

#[test]
fn filter_keeps_only_significant_characters() {
    assert_eq!(lexer::filter("a b\tc\nd"), " \t\n");
    assert_eq!(lexer::filter("no whitespace codes here!"), "   ");
    assert_eq!(lexer::filter(""), "");
}

#[test]
fn unwhite_renders_letter_form() {
    assert_eq!(lexer::unwhite(" \t\nx", 10), "STL*");
    assert_eq!(lexer::unwhite(" \t\n \t\n", 4), "STLS");
}

#[test]
fn comments_do_not_affect_tokenization() {
    // PUSH 1 followed by ENDPROGRAM, bare and with junk scattered
    // through it (even inside the number body).
    let bare = "   \t\n\n\n\n";
    let commented = "--push--  comment \tone--\n(the;end)\n\n\n";
    assert_eq!(
        parser::parse(bare).unwrap(),
        parser::parse(commented).unwrap()
    );
    assert_eq!(
        parser::parse(bare).unwrap(),
        vec![Instruction::PUSH(1), Instruction::ENDPROGRAM]
    );
}

// ===================================================================
// Number decoding
// ===================================================================

#[test]
fn push_zero_with_empty_magnitude() {
    // Sign character immediately followed by the terminator.
    assert_eq!(parser::parse("   \n").unwrap(), vec![Instruction::PUSH(0)]);
}

#[test]
fn push_zero_with_explicit_zero_digit() {
    assert_eq!(parser::parse("    \n").unwrap(), vec![Instruction::PUSH(0)]);
}

#[test]
fn push_positive_number() {
    // PUSH 8: prefix SS, sign S, digits TSSS, terminator.
    assert_eq!(
        parser::parse("   \t   \n").unwrap(),
        vec![Instruction::PUSH(8)]
    );
}

#[test]
fn push_negative_number() {
    // PUSH -2: prefix SS, sign T, digits TS, terminator.
    assert_eq!(
        parser::parse("  \t\t \n").unwrap(),
        vec![Instruction::PUSH(-2)]
    );
}

// ===================================================================
// Label decoding and resolution
// ===================================================================

#[test]
fn labels_keep_their_letter_form() {
    // MARK with label STS.
    assert_eq!(
        parser::parse("\n   \t \n").unwrap(),
        vec![Instruction::MARK(label("STS"))]
    );
}

#[test]
fn the_empty_label_is_valid() {
    assert_eq!(
        parser::parse("\n  \n").unwrap(),
        vec![Instruction::MARK(Label::empty())]
    );
}

#[test]
fn every_mark_lands_in_the_label_table() {
    let program = vec![
        Instruction::MARK(label("S")),
        Instruction::PUSH(1),
        Instruction::MARK(label("T")),
        Instruction::ENDPROGRAM,
    ];
    let labels = resolve_labels(&program);
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[&label("S")], 0);
    assert_eq!(labels[&label("T")], 2);
}

#[test]
fn duplicate_marks_keep_the_last_index() {
    let program = vec![
        Instruction::MARK(label("ST")),
        Instruction::PUSH(1),
        Instruction::MARK(label("ST")),
    ];
    let labels = resolve_labels(&program);
    assert_eq!(labels[&label("ST")], 2);
}

// ===================================================================
// Listings
// ===================================================================

#[test]
fn instructions_display_as_mnemonic_and_argument() {
    assert_eq!(Instruction::PUSH(8).to_string(), "PUSH 8");
    assert_eq!(Instruction::PUSH(-2).to_string(), "PUSH -2");
    assert_eq!(Instruction::COPY(3).to_string(), "COPY 3");
    assert_eq!(Instruction::ADD.to_string(), "ADD");
    assert_eq!(Instruction::MARK(label("STS")).to_string(), "MARK STS");
    assert_eq!(Instruction::JUMP(Label::empty()).to_string(), "JUMP");
    assert_eq!(Instruction::ENDPROGRAM.to_string(), "ENDPROGRAM");
}

// ===================================================================
// Syntax faults
// ===================================================================

#[test]
fn unknown_prefix_reports_offset_and_context() {
    // T L L matches no operation.
    let err = parser::parse("\t\n\n").unwrap_err();
    assert_eq!(
        err,
        SyntaxError::UnknownOperation {
            offset: 0,
            context: "TLL".to_string()
        }
    );
}

#[test]
fn number_without_a_sign_is_rejected() {
    // PUSH followed immediately by a line feed.
    let err = parser::parse("  \n").unwrap_err();
    assert!(matches!(err, SyntaxError::BadNumberSign { offset: 2, .. }));
}

#[test]
fn unterminated_number_is_rejected() {
    // PUSH, sign, one digit, then the stream ends.
    let err = parser::parse("   \t").unwrap_err();
    assert!(matches!(err, SyntaxError::UnterminatedNumber { .. }));
}

#[test]
fn unterminated_label_is_rejected() {
    // MARK followed by label characters but no terminator.
    let err = parser::parse("\n   \t").unwrap_err();
    assert!(matches!(err, SyntaxError::UnterminatedLabel { .. }));
}

#[test]
fn context_dump_is_capped() {
    // A long run of tabs never matches an operation; the context
    // dump stops at 25 characters.
    let source = "\t".repeat(60);
    match parser::parse(&source).unwrap_err() {
        SyntaxError::UnknownOperation { offset, context } => {
            assert_eq!(offset, 0);
            assert_eq!(context.len(), 25);
            assert!(context.chars().all(|c| c == 'T'));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
