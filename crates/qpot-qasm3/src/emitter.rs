//! OpenQASM emitter for serializing circuits.

use rustc_hash::{FxHashMap, FxHashSet};
use std::f64::consts::PI;

use qpot_ir::{Circuit, Instruction, InstructionKind, ParameterExpression, QubitId, StandardGate};

use crate::error::{QasmError, QasmResult};

/// Register used for qubits that were not added through a named register.
const ANONYMOUS_REGISTER: &str = "q";

/// Gates declared by `stdgates.inc` and `qelib1.inc`.
const LIBRARY_GATES: &[&str] = &[
    "U", "CX", "u", "u0", "u1", "u2", "u3", "p", "phase", "cphase", "id", "x", "y", "z", "h",
    "s", "sdg", "t", "tdg", "sx", "sxdg", "rx", "ry", "rz", "cx", "cy", "cz", "cp", "cu1",
    "cu3", "csx", "crx", "cry", "crz", "ch", "cu", "swap", "ccx", "cswap", "rxx", "rzz",
    "rccx", "rc3x", "c3x", "c3sqrtx", "c4x",
];

/// Keywords and built-in constants of OpenQASM 2 and 3.
const RESERVED: &[&str] = &[
    "OPENQASM", "include", "qubit", "qreg", "creg", "bit", "bool", "int", "uint", "float",
    "angle", "complex", "duration", "stretch", "array", "const", "input", "output", "let",
    "gate", "opaque", "def", "defcal", "cal", "extern", "measure", "reset", "barrier", "delay",
    "box", "if", "else", "for", "while", "in", "break", "continue", "return", "end", "switch",
    "case", "default", "ctrl", "negctrl", "inv", "pow", "gphase", "true", "false", "pi",
    "tau", "euler", "im", "mutable", "readonly", "void", "sizeof", "durationof",
];

/// Check that `name` can be declared as a register or input in emitted source.
///
/// The name must be an ASCII identifier that is neither a keyword nor a gate
/// from the standard include files.
pub fn check_identifier(name: &str) -> QasmResult<()> {
    let invalid = |reason| {
        Err(QasmError::InvalidIdentifier {
            name: name.to_string(),
            reason,
        })
    };
    let mut chars = name.chars();
    match chars.next() {
        None => return invalid("identifier is empty"),
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            return invalid("identifier must start with a letter or '_'");
        }
        Some(_) => {}
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return invalid("identifier may only contain letters, digits and '_'");
    }
    if RESERVED.contains(&name) {
        return invalid("identifier is a reserved word");
    }
    if LIBRARY_GATES.contains(&name) {
        return invalid("identifier names a standard gate");
    }
    Ok(())
}

/// Emit a circuit as OpenQASM 3.0 source code.
///
/// Free symbols become `input float[64]` declarations.
pub fn emit(circuit: &Circuit) -> QasmResult<String> {
    Emitter::new(Dialect::Qasm3).emit_circuit(circuit)
}

/// Emit a circuit as OpenQASM 2.0 source code.
///
/// Phase gates are written with their `qelib1.inc` names (`u1`, `cu1`).
/// Symbolic angles are rejected.
pub fn emit_qasm2(circuit: &Circuit) -> QasmResult<String> {
    Emitter::new(Dialect::Qasm2).emit_circuit(circuit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Qasm2,
    Qasm3,
}

struct Emitter {
    dialect: Dialect,
    output: String,
    names: FxHashMap<QubitId, String>,
}

impl Emitter {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            output: String::new(),
            names: FxHashMap::default(),
        }
    }

    fn emit_circuit(mut self, circuit: &Circuit) -> QasmResult<String> {
        match self.dialect {
            Dialect::Qasm2 => {
                self.writeln("OPENQASM 2.0;");
                self.writeln("include \"qelib1.inc\";");
            }
            Dialect::Qasm3 => {
                self.writeln("OPENQASM 3.0;");
                self.writeln("include \"stdgates.inc\";");
            }
        }
        self.writeln("");

        let symbols = circuit.parameters();
        if let Some(first) = symbols.iter().next() {
            if self.dialect == Dialect::Qasm2 {
                return Err(QasmError::UnboundParameter(first.clone()));
            }
            let registers = register_names(circuit);
            for name in &symbols {
                check_identifier(name)?;
                if registers.contains(name.as_str()) {
                    return Err(QasmError::InvalidIdentifier {
                        name: name.clone(),
                        reason: "identifier is already a register name",
                    });
                }
                self.writeln(&format!("input float[64] {name};"));
            }
        }

        self.declare_registers(circuit)?;

        let phase = circuit.global_phase();
        if phase.is_symbolic() || phase.as_f64().is_some_and(|p| p != 0.0) {
            let rendered = emit_param(phase);
            self.writeln(&format!("// global phase: {rendered}"));
        }

        for instruction in circuit.instructions() {
            self.emit_instruction(instruction)?;
        }

        Ok(self.output)
    }

    fn declare_registers(&mut self, circuit: &Circuit) -> QasmResult<()> {
        let mut declared = false;
        for register in circuit.registers() {
            if register.name() == ANONYMOUS_REGISTER
                && circuit.qubits().iter().any(|q| q.register.is_none())
            {
                return Err(QasmError::RegisterNameClash(register.name().to_string()));
            }
            check_identifier(register.name())?;
            self.declare(register.name(), register.size());
            declared = true;
        }

        let mut anonymous = 0u32;
        for qubit in circuit.qubits() {
            let name = match (&qubit.register, qubit.index) {
                (Some(reg), Some(idx)) => format!("{reg}[{idx}]"),
                _ => {
                    let name = format!("{ANONYMOUS_REGISTER}[{anonymous}]");
                    anonymous += 1;
                    name
                }
            };
            self.names.insert(qubit.id, name);
        }
        if anonymous > 0 {
            self.declare(ANONYMOUS_REGISTER, anonymous);
            declared = true;
        }

        if declared {
            self.writeln("");
        }
        Ok(())
    }

    fn declare(&mut self, name: &str, size: u32) {
        let line = match self.dialect {
            Dialect::Qasm2 => format!("qreg {name}[{size}];"),
            Dialect::Qasm3 => format!("qubit[{size}] {name};"),
        };
        self.writeln(&line);
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> QasmResult<()> {
        let qubits = self.emit_qubits(&instruction.qubits)?;
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let name = self.gate_name(&gate.kind);
                match gate.kind.parameter() {
                    Some(param) => {
                        let param = emit_param(param);
                        self.writeln(&format!("{name}({param}) {qubits};"));
                    }
                    None => self.writeln(&format!("{name} {qubits};")),
                }
            }
            InstructionKind::Barrier => {
                if qubits.is_empty() {
                    self.writeln("barrier;");
                } else {
                    self.writeln(&format!("barrier {qubits};"));
                }
            }
        }
        Ok(())
    }

    fn gate_name(&self, gate: &StandardGate) -> &'static str {
        match (self.dialect, gate) {
            (Dialect::Qasm2, StandardGate::P(_)) => "u1",
            (Dialect::Qasm2, StandardGate::CP(_)) => "cu1",
            _ => gate.name(),
        }
    }

    fn emit_qubits(&self, qubits: &[QubitId]) -> QasmResult<String> {
        let names = qubits
            .iter()
            .map(|q| self.names.get(q).cloned().ok_or(QasmError::UnmappedQubit(*q)))
            .collect::<QasmResult<Vec<_>>>()?;
        Ok(names.join(", "))
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Register names the emitted source declares.
fn register_names(circuit: &Circuit) -> FxHashSet<&str> {
    let mut names: FxHashSet<&str> = circuit.registers().map(|r| r.name()).collect();
    if circuit.qubits().iter().any(|q| q.register.is_none()) {
        names.insert(ANONYMOUS_REGISTER);
    }
    names
}

fn emit_param(param: &ParameterExpression) -> String {
    match param {
        ParameterExpression::Constant(v) => {
            if (*v - PI).abs() < 1e-10 {
                "pi".into()
            } else if (*v - PI / 2.0).abs() < 1e-10 {
                "pi/2".into()
            } else if (*v - PI / 4.0).abs() < 1e-10 {
                "pi/4".into()
            } else if (*v + PI / 2.0).abs() < 1e-10 {
                "-pi/2".into()
            } else if (*v + PI / 4.0).abs() < 1e-10 {
                "-pi/4".into()
            } else {
                format!("{v}")
            }
        }
        ParameterExpression::Symbol(name) => name.clone(),
        ParameterExpression::Neg(e) => format!("-({})", emit_param(e)),
        ParameterExpression::Add(a, b) => format!("({} + {})", emit_param(a), emit_param(b)),
        ParameterExpression::Sub(a, b) => format!("({} - {})", emit_param(a), emit_param(b)),
        ParameterExpression::Mul(a, b) => format!("({} * {})", emit_param(a), emit_param(b)),
    }
}
