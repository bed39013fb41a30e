use wspace::executor::Executor;
use wspace::instruction::{Instruction, Label};
use wspace::parser;
use wspace::selftest::{EXPECTED_RESULTS, TEST_CODE};

#[test]
fn self_test_reproduces_the_expected_sequence() {
    let program = parser::parse(TEST_CODE).unwrap();
    let mut output = Vec::new();
    // The tail of the program echoes one character and one number.
    let mut executor = Executor::new(program, &b"x7\n"[..], &mut output);
    executor.run().unwrap();
    let output = String::from_utf8(output).unwrap();
    assert_eq!(output, format!("{EXPECTED_RESULTS} x7"));
}

#[test]
fn self_test_tokenizes_despite_its_commentary() {
    let program = parser::parse(TEST_CODE).unwrap();
    // It opens by jumping over the space-printing subroutine.
    assert_eq!(
        program[0],
        Instruction::JUMP(Label::parse("STS").unwrap())
    );
    assert_eq!(program.last(), Some(&Instruction::ENDPROGRAM));
}
