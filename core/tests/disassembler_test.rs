use invaders_core::{Disassembler, Memory};

fn load(program: &[u8]) -> Memory {
    let mut mem = Memory::new_ram();
    mem.flash_slice(0, program);
    mem
}

#[test]
fn disassembles_a_short_program_with_correct_addresses() {
    let mem = load(&[
        0x3E, 0x42, // MVI A,$42
        0xC6, 0x01, // ADI $01
        0x76, // HLT
    ]);
    let mut d = Disassembler::new();
    let (addr1, text1) = d.step(&mem).unwrap();
    let (addr2, text2) = d.step(&mem).unwrap();
    let (addr3, text3) = d.step(&mem).unwrap();

    assert_eq!(addr1, 0x0000);
    assert_eq!(text1, "MVI A,$42");
    assert_eq!(addr2, 0x0002);
    assert_eq!(text2, "ADI $01");
    assert_eq!(addr3, 0x0004);
    assert_eq!(text3, "HLT");
}

#[test]
fn reset_repositions_the_program_counter() {
    let mem = load(&[0x00, 0x00, 0x76]); // NOP; NOP; HLT
    let mut d = Disassembler::new();
    d.reset(0x0002);
    let (addr, text) = d.step(&mem).unwrap();
    assert_eq!(addr, 0x0002);
    assert_eq!(text, "HLT");
}

#[test]
fn illegal_opcode_is_an_error() {
    let mem = load(&[0xDD]); // illegal
    let mut d = Disassembler::new();
    assert!(d.step(&mem).is_err());
}

#[test]
fn three_byte_instructions_print_their_address_operand() {
    let mem = load(&[0xC3, 0x34, 0x12]); // JMP $1234
    let mut d = Disassembler::new();
    let (_, text) = d.step(&mem).unwrap();
    assert_eq!(text, "JMP $1234");
}

#[test]
fn mov_prints_destination_then_source() {
    let mem = load(&[0x41]); // MOV B,C
    let mut d = Disassembler::new();
    let (_, text) = d.step(&mem).unwrap();
    assert_eq!(text, "MOV B,C");
}
