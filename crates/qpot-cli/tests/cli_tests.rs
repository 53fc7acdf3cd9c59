//! CLI argument parsing and end-to-end tests.
//!
//! Parsing is tested through `try_parse_from` on structs mirroring the
//! binary's, and end-to-end behaviour by running the built `qpot` binary.

// ============================================================================
// Clap argument parsing
// ============================================================================

mod clap_parsing {
    use clap::{Args, Parser, Subcommand};

    #[derive(Parser)]
    #[command(name = "qpot")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Args, Debug)]
    struct TestPotentialArgs {
        #[arg(short, long)]
        config: Option<String>,
        #[arg(short, long, default_value = "3")]
        num_qubits: u32,
        #[arg(long, default_value = "1.0")]
        mass: f64,
        #[arg(long, default_value = "1.0")]
        omega: f64,
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        x0: f64,
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        delta: f64,
        #[arg(long, default_value = "decomposed")]
        synthesis: String,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Matrix {
            #[command(flatten)]
            potential: TestPotentialArgs,
            #[arg(long)]
            full: bool,
            #[arg(short, long, default_value = "table")]
            format: String,
        },
        Circuit {
            #[command(flatten)]
            potential: TestPotentialArgs,
            #[arg(short, long, allow_negative_numbers = true)]
            time: Option<f64>,
            #[arg(long, conflicts_with_all = ["time", "qasm2"])]
            symbolic: Option<String>,
            #[arg(long, default_value = "q")]
            register: String,
            #[arg(long)]
            qasm2: bool,
            #[arg(short, long)]
            output: Option<String>,
        },
        Verify {
            #[command(flatten)]
            potential: TestPotentialArgs,
            #[arg(short, long, allow_negative_numbers = true)]
            time: Option<f64>,
            #[arg(long, default_value = "1e-9")]
            tolerance: f64,
        },
        List,
        Version,
    }

    #[test]
    fn test_parse_matrix_defaults() {
        let cli = TestCli::try_parse_from(["qpot", "matrix"]).unwrap();
        match cli.command {
            TestCommands::Matrix {
                potential,
                full,
                format,
            } => {
                assert!(potential.config.is_none());
                assert_eq!(potential.num_qubits, 3);
                assert_eq!(potential.mass, 1.0);
                assert_eq!(potential.x0, 0.0);
                assert_eq!(potential.synthesis, "decomposed");
                assert!(!full);
                assert_eq!(format, "table");
            }
            _ => panic!("expected Matrix command"),
        }
    }

    #[test]
    fn test_parse_negative_numbers() {
        let cli = TestCli::try_parse_from([
            "qpot", "matrix", "-n", "4", "--x0", "-2.5", "--delta", "-0.25",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Matrix { potential, .. } => {
                assert_eq!(potential.num_qubits, 4);
                assert_eq!(potential.x0, -2.5);
                assert_eq!(potential.delta, -0.25);
            }
            _ => panic!("expected Matrix command"),
        }
    }

    #[test]
    fn test_parse_circuit_with_all_args() {
        let cli = TestCli::try_parse_from([
            "qpot",
            "circuit",
            "-c",
            "harmonic.yaml",
            "-t",
            "-0.5",
            "--register",
            "x",
            "--qasm2",
            "-o",
            "out.qasm",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Circuit {
                potential,
                time,
                symbolic,
                register,
                qasm2,
                output,
            } => {
                assert_eq!(potential.config.as_deref(), Some("harmonic.yaml"));
                assert_eq!(time, Some(-0.5));
                assert!(symbolic.is_none());
                assert_eq!(register, "x");
                assert!(qasm2);
                assert_eq!(output.as_deref(), Some("out.qasm"));
            }
            _ => panic!("expected Circuit command"),
        }
    }

    #[test]
    fn test_symbolic_conflicts_with_time() {
        let result =
            TestCli::try_parse_from(["qpot", "circuit", "--symbolic", "t", "--time", "1.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_symbolic_conflicts_with_qasm2() {
        let result = TestCli::try_parse_from(["qpot", "circuit", "--symbolic", "t", "--qasm2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_verify_tolerance() {
        let cli = TestCli::try_parse_from(["qpot", "verify", "--tolerance", "1e-6"]).unwrap();
        match cli.command {
            TestCommands::Verify {
                time, tolerance, ..
            } => {
                assert!(time.is_none());
                assert_eq!(tolerance, 1e-6);
            }
            _ => panic!("expected Verify command"),
        }
    }

    #[test]
    fn test_parse_list_and_version() {
        assert!(matches!(
            TestCli::try_parse_from(["qpot", "list"]).unwrap().command,
            TestCommands::List
        ));
        assert!(matches!(
            TestCli::try_parse_from(["qpot", "version"]).unwrap().command,
            TestCommands::Version
        ));
    }

    #[test]
    fn test_parse_verbose_vv() {
        let cli = TestCli::try_parse_from(["qpot", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_invalid_number() {
        let result = TestCli::try_parse_from(["qpot", "matrix", "--mass", "heavy"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_subcommand() {
        assert!(TestCli::try_parse_from(["qpot"]).is_err());
    }
}

// ============================================================================
// End-to-end runs of the binary
// ============================================================================

mod end_to_end {
    use std::io::Write;
    use std::process::{Command, Output};

    fn qpot(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_qpot"))
            .args(args)
            .env_remove("QPOT_CONFIG")
            .output()
            .unwrap()
    }

    fn stdout(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    #[test]
    fn test_matrix_json_diagonal() {
        let output = qpot(&[
            "matrix", "-n", "2", "--omega", "2.0", "--x0", "-1.0", "--delta", "0.5", "-f", "json",
        ]);
        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        let diagonal: Vec<f64> = value["diagonal"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_f64().unwrap())
            .collect();
        assert_eq!(diagonal, vec![2.0, 0.5, 0.0, 0.5]);
    }

    #[test]
    fn test_matrix_unknown_format_fails() {
        let output = qpot(&["matrix", "-f", "csv"]);
        assert!(!output.status.success());
    }

    #[test]
    fn test_circuit_to_stdout_is_qasm3() {
        let output = qpot(&["circuit", "-n", "2", "--x0", "0.5", "--delta", "0.25"]);
        assert!(output.status.success());
        let qasm = stdout(&output);
        assert!(qasm.starts_with("OPENQASM 3.0;"));
        assert!(qasm.contains("qubit[2] q;"));
        assert!(qasm.contains("cx q[0], q[1];"));
    }

    #[test]
    fn test_circuit_symbolic_declares_input() {
        let output = qpot(&["circuit", "-n", "2", "--symbolic", "time"]);
        assert!(output.status.success());
        let qasm = stdout(&output);
        assert!(qasm.contains("input float[64] time;"));
        assert!(qasm.contains("qubit[2] q;"));
    }

    #[test]
    fn test_circuit_symbol_clashing_with_qasm_names_fails() {
        for symbol in ["t", "q", "2t"] {
            let output = qpot(&["circuit", "-n", "2", "--symbolic", symbol]);
            assert!(!output.status.success(), "--symbolic {symbol} succeeded");
            assert!(stdout(&output).is_empty());
        }
    }

    #[test]
    fn test_circuit_invalid_register_fails() {
        for register in ["", "pos grid", "cx"] {
            let output = qpot(&["circuit", "-n", "2", "--register", register]);
            assert!(!output.status.success(), "--register {register:?} succeeded");
            assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid register name"));
        }
    }

    #[test]
    fn test_circuit_qasm2_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harmonic.qasm");
        let path_str = path.to_str().unwrap();
        let output = qpot(&[
            "circuit", "-n", "3", "--register", "x", "--qasm2", "-o", path_str,
        ]);
        assert!(output.status.success());
        let qasm = std::fs::read_to_string(&path).unwrap();
        assert!(qasm.starts_with("OPENQASM 2.0;"));
        assert!(qasm.contains("qreg x[3];"));
        assert!(qasm.contains("u1("));
    }

    #[test]
    fn test_verify_from_config_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "name: harmonic\nnum_qubits: 4\nm: 1.5\nomega: 0.8\nx0: -1.2\ndelta: 0.15\nevolution_time: 0.6\nsynthesis: controlled_phase"
        )
        .unwrap();
        let output = qpot(&["verify", "-c", file.path().to_str().unwrap()]);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(stdout(&output).contains("max deviation"));
    }

    #[test]
    fn test_zero_qubits_rejected() {
        let output = qpot(&["matrix", "-n", "0"]);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
    }

    #[test]
    fn test_list_shows_harmonic() {
        let output = qpot(&["list"]);
        assert!(output.status.success());
        assert!(stdout(&output).contains("harmonic"));
    }
}
