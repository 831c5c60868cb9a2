use crate::Vcc;
use crate::diagnostics::DiagnosticKind;
use crate::parser::TokenKind;

fn first_message(vcc: &Vcc<'_>) -> String {
    vcc.diagnostics().iter().next().unwrap().to_string()
}

#[test]
fn durations() {
    let cases = [
        ("10s", 10.0),
        ("1.5m", 90.0),
        ("250ms", 0.25),
        ("2 h", 7200.0),
        ("1d", 86400.0),
        ("1w", 604800.0),
        ("1y", 31_536_000.0),
    ];
    for (source, expected) in cases {
        let mut vcc = Vcc::new(source);
        assert_eq!(vcc.duration(), Ok(expected), "{source}");
        assert!(vcc.eof());
    }
}

#[test]
fn unknown_duration_unit() {
    let mut vcc = Vcc::new("10 fortnights;");
    assert!(vcc.duration().is_err());
    assert_eq!(vcc.diagnostics().kinds(), vec![DiagnosticKind::UnknownDurationUnit]);
    insta::assert_snapshot!(
        first_message(&vcc),
        @"error at 3..13: Unknown duration unit 'fortnights' (hint: Legal duration units are 'ms', 's', 'm', 'h', 'd', 'w' and 'y')"
    );
}

#[test]
fn duration_units_are_case_sensitive() {
    let mut vcc = Vcc::new("1S");
    assert!(vcc.duration().is_err());
}

#[test]
fn duration_needs_a_unit() {
    let mut vcc = Vcc::new("10;");
    assert!(vcc.duration().is_err());
    insta::assert_snapshot!(first_message(&vcc), @"error at 2..3: expected identifier, found `;`");
}

#[test]
fn duration_needs_a_number() {
    let mut vcc = Vcc::new("soon");
    assert!(vcc.duration().is_err());
    insta::assert_snapshot!(first_message(&vcc), @"error at 0..4: expected number, found `soon`");
}

#[test]
fn huge_duration_is_rejected() {
    let source = format!("{} s;", "9".repeat(400));
    let mut vcc = Vcc::new(&source);
    assert!(vcc.duration().is_err());
    assert_eq!(vcc.diagnostics().kinds(), vec![DiagnosticKind::DurationOverflow]);
    insta::assert_snapshot!(first_message(&vcc), @"error at 0..402: duration is too large to represent");
}

#[test]
fn largest_finite_duration() {
    let source = format!("{} s", "9".repeat(300));
    let mut vcc = Vcc::new(&source);
    let seconds = vcc.duration().unwrap();
    assert!(seconds.is_finite());
}

#[test]
fn byte_sizes() {
    let cases = [
        ("512B", 512),
        ("1KB", 1024),
        ("1.5KB", 1536),
        ("2 mb", 2 << 20),
        ("1k", 1024),
        ("3G", 3 << 30),
        ("1TB", 1 << 40),
        ("1PB", 1 << 50),
        ("0.5MB", 512 << 10),
    ];
    for (source, expected) in cases {
        let mut vcc = Vcc::new(source);
        assert_eq!(vcc.byte_val(), Ok(expected), "{source}");
        assert!(vcc.eof());
    }
}

#[test]
fn bytes_overflow_does_not_wrap() {
    let mut vcc = Vcc::new("9223372036854775807 KB");
    assert!(vcc.byte_val().is_err());
    assert_eq!(vcc.diagnostics().kinds(), vec![DiagnosticKind::BytesOverflow]);
    insta::assert_snapshot!(
        first_message(&vcc),
        @"error at 20..22: BYTES can not be represented with adequate precision 'KB' (hint: Legal multiplier units are 'B', 'KB', 'MB', 'GB', 'TB' and 'PB')"
    );
}

#[test]
fn fractional_bytes_are_imprecise() {
    let mut vcc = Vcc::new("1.5B");
    assert!(vcc.byte_val().is_err());
    assert_eq!(vcc.diagnostics().kinds(), vec![DiagnosticKind::BytesOverflow]);
}

#[test]
fn unknown_bytes_unit() {
    let mut vcc = Vcc::new("10 XB");
    assert!(vcc.byte_val().is_err());
    assert_eq!(vcc.diagnostics().kinds(), vec![DiagnosticKind::UnknownBytesUnit]);
    let msg = vcc.diagnostics().iter().next().unwrap();
    insta::assert_snapshot!(msg.message(), @"Unknown BYTES unit 'XB'");
}

#[test]
fn bytes_needs_a_unit() {
    let mut vcc = Vcc::new("10;");
    assert!(vcc.byte_val().is_err());
    let msg = vcc.diagnostics().iter().next().unwrap();
    insta::assert_snapshot!(msg.message(), @"Expected BYTES unit (B, KB, MB...) got ';'");

    let mut vcc = Vcc::new("10");
    assert!(vcc.byte_val().is_err());
    let msg = vcc.diagnostics().iter().next().unwrap();
    insta::assert_snapshot!(msg.message(), @"Expected BYTES unit (B, KB, MB...) got end of input");
}

#[test]
fn bytes_magnitude_too_large() {
    let mut vcc = Vcc::new("99999999999999999999 B");
    assert!(vcc.byte_val().is_err());
    let msg = vcc.diagnostics().iter().next().unwrap();
    assert_eq!(msg.kind(), DiagnosticKind::BytesParse);
    insta::assert_snapshot!(msg.message(), @"BYTES parsing error at '99999999999999999999'");
    // the magnitude is not consumed
    assert_eq!(vcc.current().kind, TokenKind::CNum);
}

#[test]
fn counts() {
    let mut vcc = Vcc::new("42 4294967295");
    assert_eq!(vcc.uint_val(), Ok(42));
    assert_eq!(vcc.uint_val(), Ok(u32::MAX));
}

#[test]
fn count_overflow() {
    let mut vcc = Vcc::new("4294967296");
    assert!(vcc.uint_val().is_err());
    let msg = vcc.diagnostics().iter().next().unwrap();
    assert_eq!(msg.kind(), DiagnosticKind::CountOverflow);
    insta::assert_snapshot!(msg.message(), @"count 4294967296 does not fit in 32 bits");
}

#[test]
fn count_rejects_decimals() {
    let mut vcc = Vcc::new("1.5");
    assert!(vcc.uint_val().is_err());
    insta::assert_snapshot!(first_message(&vcc), @"error at 0..3: expected integer, found `1.5`");
}
