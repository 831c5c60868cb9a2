use indoc::indoc;

use crate::diagnostics::{DiagnosticKind, Severity};
use crate::program::{LiteralKind, LiteralValue};
use crate::test_utils::{compile_fixture, compile_fixture_with, render_diagnostics};
use crate::{Config, Error};

#[test]
fn keywords_round_trip() {
    for kind in LiteralKind::ALL {
        assert_eq!(LiteralKind::from_keyword(kind.keyword()), Some(kind));
    }
    assert_eq!(LiteralKind::from_keyword("Regex"), None);
}

#[test]
fn artifact_for_local_literals() {
    let output = compile_fixture(indoc! {r#"
        regex "^/api/";
        duration 10s;
        bytes 1.5KB;
        count 3;
        path "/run/app.sock";
    "#});

    assert!(output.is_valid());
    assert!(output.diagnostics.is_empty());
    insta::assert_snapshot!(output.artifact, @r#"
    /* Generated by vclc. Do not edit. */

    static void *VGC_re_0;

    static const vtim_dur VGC_dur_1 = 10.0;
    static const int64_t VGC_bytes_2 = 1536;
    static const unsigned VGC_uint_3 = 3;
    static const struct vrt_endpoint VGC_endpoint_4 = {
    	.magic = VRT_ENDPOINT_MAGIC,
    	.path = "/run/app.sock",
    	.ipv4_suckaddr = (void *) 0,
    	.ipv6_suckaddr = (void *) 0,
    };

    static int
    VGC_Load(VRT_CTX)
    {
    	/* 1 */
    	VRT_re_init(&VGC_re_0, "^/api/");
    	return (0);
    }

    static int
    VGC_Discard(VRT_CTX)
    {
    	/* 1 */
    	VRT_re_fini(VGC_re_0);
    	return (0);
    }
    "#);
}

#[test]
fn values_in_statement_order() {
    let output = compile_fixture(indoc! {r#"
        duration 250ms;
        count 7;
        regex {"^/(a|b)$"};
    "#});

    assert_eq!(
        output.values,
        vec![
            LiteralValue::Duration {
                symbol: "VGC_dur_0".to_string(),
                seconds: 0.25,
            },
            LiteralValue::Count {
                symbol: "VGC_uint_1".to_string(),
                value: 7,
            },
            LiteralValue::Regex {
                symbol: "VGC_re_2".to_string(),
                pattern: "^/(a|b)$".to_string(),
            },
        ]
    );
    assert_eq!(output.values[2].kind(), LiteralKind::Regex);
    assert_eq!(output.values[2].symbol(), "VGC_re_2");
}

#[test]
fn ip_constant_body() {
    let output = compile_fixture(r#"ip "192.0.2.1";"#);
    assert!(output.is_valid());
    assert!(
        output
            .artifact
            .contains("static const void * const VGC_ip_1 = (const void*)suckaddr_0;\n")
    );
    assert!(output.artifact.contains("/* \"192.0.2.1\" -> 192.0.2.1 */"));
    assert_eq!(
        output.values,
        vec![LiteralValue::Ip {
            symbol: "VGC_ip_1".to_string(),
            host: "192.0.2.1".to_string(),
            addr: "192.0.2.1".to_string(),
        }]
    );
}

#[test]
fn ip_constant_rejects_dual_stack() {
    let output = compile_fixture(r#"ip "dual.example";"#);
    assert!(!output.is_valid());
    assert_eq!(output.diagnostics.kinds(), vec![DiagnosticKind::AmbiguousAddress]);
    assert!(output.values.is_empty());
    assert!(!output.artifact.contains("suckaddr_"));
}

#[test]
fn backend_body() {
    let output = compile_fixture(r#"backend "dual.example" port "8080";"#);
    assert!(output.is_valid());

    let body_start = output.artifact.find("static const struct vrt_endpoint").unwrap();
    let body_end = output.artifact[body_start..].find("};\n").unwrap() + body_start + 3;
    insta::assert_snapshot!(&output.artifact[body_start..body_end], @r#"
    static const struct vrt_endpoint VGC_endpoint_2 = {
    	.magic = VRT_ENDPOINT_MAGIC,
    	.ipv4_suckaddr = (const struct suckaddr *)(const void*)suckaddr_0,
    	.ipv4_addr = "192.0.2.10",
    	.ipv6_suckaddr = (const struct suckaddr *)(const void*)suckaddr_1,
    	.ipv6_addr = "2001:db8::10",
    	.port = "8080",
    	.path = (void *) 0,
    };
    "#);
}

#[test]
fn backend_port_in_host() {
    let output = compile_fixture(r#"backend "www.example:81";"#);
    assert!(output.is_valid());
    assert!(output.artifact.contains("\t.port = \"81\",\n"));
    assert!(!output.artifact.contains(".ipv6_addr"));
}

#[test]
fn backend_default_port_from_config() {
    let output = compile_fixture_with(
        r#"backend "www.example";"#,
        Config::new().default_port("8443"),
    );
    assert!(output.artifact.contains("\t.port = \"8443\",\n"));
}

#[cfg(unix)]
#[test]
fn backend_named_port() {
    if !std::path::Path::new("/etc/services").exists() {
        return;
    }
    let output = crate::compile(r#"backend "127.0.0.1" port "http";"#, Config::new());
    assert!(output.is_valid(), "{:?}", output.diagnostics.kinds());
    let LiteralValue::Backend { addrs, .. } = &output.values[0] else {
        panic!("expected a backend, got {:?}", output.values[0]);
    };
    assert_eq!(addrs.port_ascii.as_deref(), Some("80"));
    assert_eq!(addrs.ipv4_ascii.as_deref(), Some("127.0.0.1"));
}

#[test]
fn backend_pool_is_ambiguous() {
    let output = compile_fixture(r#"backend "pool.example";"#);
    let msg = output.diagnostics.iter().next().unwrap();
    assert_eq!(msg.kind(), DiagnosticKind::AmbiguousAddress);
    assert_eq!(msg.hints()[0], "Only one IPv4 and one IPv6 are allowed.");
}

#[test]
fn missing_socket_warns_but_emits() {
    let source = r#"path "/missing/app.sock";"#;
    let output = compile_fixture(source);

    assert!(output.is_valid());
    assert_eq!(output.diagnostics.warning_count(), 1);
    assert!(output.artifact.contains("\t.path = \"/missing/app.sock\",\n"));
    assert_eq!(output.values.len(), 1);

    let strict = compile_fixture_with(source, Config::new().strict(true));
    assert!(!strict.is_valid());
    let err = strict.into_result().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"compilation failed with 0 errors and 1 warnings");
}

#[test]
fn denied_socket_warns() {
    let output = compile_fixture(r#"path "/denied/app.sock";"#);
    let msg = output.diagnostics.iter().next().unwrap();
    assert_eq!(msg.severity(), Severity::Warning);
    assert!(output.is_valid());
}

#[test]
fn failed_path_leaves_no_partial_struct() {
    let output = compile_fixture(r#"path "/etc/passwd"; count 1;"#);
    assert_eq!(output.diagnostics.kinds(), vec![DiagnosticKind::NotASocket]);
    assert!(!output.artifact.contains("vrt_endpoint"));
    assert!(output.artifact.contains("static const unsigned VGC_uint_1 = 1;\n"));
}

#[test]
fn infinite_duration_emits_nothing() {
    let source = format!("duration {}y; count 1;", "9".repeat(400));
    let output = compile_fixture(&source);
    assert!(!output.is_valid());
    assert_eq!(output.diagnostics.kinds(), vec![DiagnosticKind::DurationOverflow]);
    assert!(!output.artifact.contains("vtim_dur"));
    assert!(!output.artifact.contains(" = inf;"));
    assert!(output.artifact.contains("static const unsigned VGC_uint_0 = 1;\n"));
}

#[test]
fn recovery_collects_every_error() {
    let output = compile_fixture(indoc! {r#"
        count x;
        bytes 10 XB;
        regex "(";
        duration 5s;
        bogus 1;
        count 2
    "#});

    assert_eq!(
        output.diagnostics.kinds(),
        vec![
            DiagnosticKind::UnexpectedToken,
            DiagnosticKind::UnknownBytesUnit,
            DiagnosticKind::RegexCompile,
            DiagnosticKind::UnexpectedToken,
            DiagnosticKind::UnexpectedToken,
        ]
    );
    assert_eq!(output.values.len(), 1);
    assert_eq!(output.values[0].kind(), LiteralKind::Duration);

    let messages: Vec<_> = output.diagnostics.iter().map(|d| d.message()).collect();
    insta::assert_snapshot!(messages.join("\n"), @r#"
    expected integer, found `x`
    Unknown BYTES unit 'XB'
    Regexp compilation error: unclosed group (at offset 0)
    expected one of `regex`, `duration`, `bytes`, `count`, `ip`, `backend`, `path`, found `bogus`
    expected `;`, found end of input
    "#);
}

#[test]
fn into_result_on_failure() {
    let output = compile_fixture("count 99999999999;");
    match output.into_result() {
        Err(Error::CompileFailed(diagnostics)) => {
            assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::CountOverflow]);
        }
        Ok(_) => panic!("expected failure"),
    }
}

#[test]
fn rendered_diagnostic() {
    let result = render_diagnostics(r#"path "rel";"#);
    insta::assert_snapshot!(result, @r#"
    error: Backend path: Must be an absolute path
      |
    1 | path "rel";
      |      ^^^^^
    "#);
}

#[test]
fn output_serializes_values() {
    let output = compile_fixture("bytes 4KB; backend \"www.example\";");
    let json = serde_json::to_value(&output).unwrap();

    assert_eq!(json["values"][0]["kind"], "bytes");
    assert_eq!(json["values"][0]["symbol"], "VGC_bytes_0");
    assert_eq!(json["values"][0]["bytes"], 4096);
    assert_eq!(json["values"][1]["kind"], "backend");
    assert_eq!(json["values"][1]["ipv4_ascii"], "192.0.2.10");
    assert_eq!(json["values"][1]["port_ascii"], "80");
    assert!(json["values"][1].get("ipv6").is_none());
    assert!(json["artifact"].as_str().unwrap().contains("VGC_Load"));
    assert!(json.get("diagnostics").is_none());
}
