//! High-level circuit builder API.

use std::collections::{BTreeMap, BTreeSet};

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::Instruction;
use crate::parameter::ParameterExpression;
use crate::qubit::{QuantumRegister, Qubit, QubitId};

/// A quantum circuit.
///
/// This provides a high-level API for building quantum circuits,
/// with convenient methods for common gates and operations.
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    qubits: Vec<Qubit>,
    /// Registers in declaration order, with the qubits allocated for them.
    registers: Vec<(QuantumRegister, Vec<QubitId>)>,
    dag: CircuitDag,
    next_qubit_id: u32,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            registers: vec![],
            dag: CircuitDag::new(),
            next_qubit_id: 0,
        }
    }

    /// Create a circuit with `num_qubits` anonymous qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        circuit
    }

    /// Create a circuit holding exactly one register.
    pub fn with_register(name: impl Into<String>, register: &QuantumRegister) -> Self {
        let mut circuit = Self::new(name);
        circuit.registers.push((register.clone(), Vec::new()));
        let ids = circuit.allocate(register.name(), register.size());
        circuit.registers[0].1 = ids;
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.next_qubit_id);
        self.next_qubit_id += 1;
        self.qubits.push(Qubit::new(id));
        self.dag.add_qubit(id);
        id
    }

    /// Add a quantum register, returning the ids of its qubits in register order.
    pub fn add_qreg(&mut self, register: &QuantumRegister) -> IrResult<Vec<QubitId>> {
        if self.registers.iter().any(|(r, _)| r.name() == register.name()) {
            return Err(IrError::DuplicateRegister(register.name().to_string()));
        }
        let ids = self.allocate(register.name(), register.size());
        self.registers.push((register.clone(), ids.clone()));
        Ok(ids)
    }

    fn allocate(&mut self, name: &str, size: u32) -> Vec<QubitId> {
        let mut ids = Vec::with_capacity(size as usize);
        for i in 0..size {
            let id = QubitId(self.next_qubit_id);
            self.next_qubit_id += 1;
            self.qubits.push(Qubit::with_register(id, name, i));
            self.dag.add_qubit(id);
            ids.push(id);
        }
        ids
    }

    /// Qubits of the named register, in register order.
    pub fn register_qubits(&self, name: &str) -> IrResult<&[QubitId]> {
        self.registers
            .iter()
            .find(|(r, _)| r.name() == name)
            .map(|(_, ids)| ids.as_slice())
            .ok_or_else(|| IrError::UnknownRegister(name.to_string()))
    }

    /// Registers declared on this circuit.
    pub fn registers(&self) -> impl Iterator<Item = &QuantumRegister> {
        self.registers.iter().map(|(r, _)| r)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::H, qubit)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::X, qubit)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Y, qubit)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Z, qubit)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::S, qubit)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Sdg, qubit)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::T, qubit)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Tdg, qubit)
    }

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.single(StandardGate::Rx(theta.into()), qubit)
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.single(StandardGate::Ry(theta.into()), qubit)
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.single(StandardGate::Rz(theta.into()), qubit)
    }

    /// Apply phase gate.
    pub fn p(
        &mut self,
        lambda: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.single(StandardGate::P(lambda.into()), qubit)
    }

    /// Apply `u1(λ)`, the legacy name of the phase gate.
    pub fn u1(
        &mut self,
        lambda: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.p(lambda, qubit)
    }

    fn single(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(gate, qubit))?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CX,
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply controlled-Z gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CZ,
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply controlled phase gate.
    pub fn cp(
        &mut self,
        lambda: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CP(lambda.into()),
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Add `phase` to the circuit's global phase.
    pub fn add_global_phase(&mut self, phase: impl Into<ParameterExpression>) -> &mut Self {
        let total = (self.dag.global_phase().clone() + phase.into()).simplify();
        self.dag.set_global_phase(total);
        self
    }

    /// Bind a symbol in every gate angle and in the global phase.
    pub fn bind_parameter(&mut self, name: &str, value: f64) -> &mut Self {
        self.dag.for_each_instruction_mut(|inst| {
            if let Some(p) = inst
                .gate_mut()
                .and_then(|g| g.kind.parameter_mut())
            {
                *p = p.bind(name, value);
            }
        });
        let phase = self.dag.global_phase().bind(name, value);
        self.dag.set_global_phase(phase);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Get the number of operations.
    pub fn num_ops(&self) -> usize {
        self.dag.num_ops()
    }

    /// Count operations by name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for (_, inst) in self.dag.topological_ops() {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Instructions in topological order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.dag.topological_ops().map(|(_, inst)| inst)
    }

    /// The circuit's global phase.
    pub fn global_phase(&self) -> &ParameterExpression {
        self.dag.global_phase()
    }

    /// True if any gate angle or the global phase is symbolic.
    pub fn is_parameterized(&self) -> bool {
        !self.parameters().is_empty()
    }

    /// Names of all unbound symbols.
    pub fn parameters(&self) -> BTreeSet<String> {
        let mut names = self.dag.global_phase().symbols();
        for inst in self.instructions() {
            if let Some(p) = inst.as_gate().and_then(|g| g.kind.parameter()) {
                names.extend(p.symbols());
            }
        }
        names
    }

    /// Get a reference to the underlying DAG.
    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Get the qubits.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("empty");
        assert_eq!(circuit.name(), "empty");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("sized", 3);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.registers().count(), 0);
    }

    #[test]
    fn test_with_register() {
        let reg = QuantumRegister::new("pos", 3);
        let circuit = Circuit::with_register("potential", &reg);
        assert_eq!(circuit.num_qubits(), 3);
        let ids = circuit.register_qubits("pos").unwrap();
        assert_eq!(ids, &[QubitId(0), QubitId(1), QubitId(2)]);
        assert_eq!(circuit.qubits()[2].to_string(), "pos[2]");
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("two_regs");
        let a = circuit.add_qreg(&QuantumRegister::new("a", 2)).unwrap();
        let b = circuit.add_qreg(&QuantumRegister::new("b", 2)).unwrap();
        assert_eq!(a, vec![QubitId(0), QubitId(1)]);
        assert_eq!(b, vec![QubitId(2), QubitId(3)]);
        assert!(matches!(
            circuit.add_qreg(&QuantumRegister::new("a", 1)),
            Err(IrError::DuplicateRegister(_))
        ));
        assert!(matches!(
            circuit.register_qubits("c"),
            Err(IrError::UnknownRegister(_))
        ));
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("fluent", 2);
        circuit
            .u1(0.25, QubitId(0))
            .unwrap()
            .x(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();
        assert_eq!(circuit.num_ops(), 3);
        assert_eq!(circuit.depth(), 3);
        let counts = circuit.count_ops();
        assert_eq!(counts.get("p"), Some(&1));
        assert_eq!(counts.get("x"), Some(&1));
        assert_eq!(counts.get("cx"), Some(&1));
    }

    #[test]
    fn test_bind_parameter() {
        let mut circuit = Circuit::with_size("param", 1);
        let t = ParameterExpression::symbol("t");
        circuit.p(t.scaled(2.0), QubitId(0)).unwrap();
        circuit.add_global_phase(t.scaled(-1.0));
        assert!(circuit.is_parameterized());
        assert_eq!(circuit.parameters().into_iter().collect::<Vec<_>>(), vec!["t"]);

        circuit.bind_parameter("t", 0.5);
        assert!(!circuit.is_parameterized());
        let angle = circuit
            .instructions()
            .next()
            .and_then(|i| i.as_gate())
            .and_then(|g| g.kind.parameter())
            .and_then(ParameterExpression::as_f64);
        assert_eq!(angle, Some(1.0));
        assert_eq!(circuit.global_phase().as_f64(), Some(-0.5));
    }

    #[test]
    fn test_global_phase_accumulates() {
        let mut circuit = Circuit::with_size("phase", 1);
        circuit.add_global_phase(0.5).add_global_phase(0.25);
        assert_eq!(circuit.global_phase().as_f64(), Some(0.75));
    }
}
