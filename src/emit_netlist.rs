// SPDX-License-Identifier: Apache-2.0

//! Renders a lowered network as a structural Verilog module that instantiates
//! library cells by name.

use std::collections::HashMap;

use crate::cell::{Constants, Signal};
use crate::chain::{ArithOp, OpDescriptor};
use crate::lower_config::CellNames;
use crate::network::Network;
use crate::operand::Operand;

fn add_ports(
    prefix: &str,
    operand: &Operand,
    ports: &mut Vec<String>,
    names: &mut HashMap<Signal, String>,
) {
    for (i, bit) in operand.bits().iter().enumerate() {
        let name = format!("{}_{}", prefix, i);
        ports.push(format!("input wire {}", name));
        // A bit that is already named (e.g. an operand bit tied to a constant
        // net) keeps its first name; the extra port is left unconnected.
        names.entry(*bit).or_insert(name);
    }
}

pub fn emit_netlist(
    module_name: &str,
    descriptor: &OpDescriptor,
    network: &Network,
    constants: &Constants,
    cell_names: &CellNames,
) -> String {
    let mut names: HashMap<Signal, String> = HashMap::new();
    names.insert(constants.zero, constants.zero.to_string());
    names.insert(constants.one, constants.one.to_string());

    let mut ports: Vec<String> = Vec::new();
    match &descriptor.op {
        ArithOp::Add { a, b } | ArithOp::Subtract { a, b } => {
            add_ports("a", a, &mut ports, &mut names);
            add_ports("b", b, &mut ports, &mut names);
        }
        ArithOp::Increment { a, literal } => {
            add_ports("a", a, &mut ports, &mut names);
            if let Some(literal) = literal {
                add_ports("lit", literal, &mut ports, &mut names);
            }
        }
    }
    for i in 0..network.result_width() {
        ports.push(format!("output wire y_{}", i));
    }

    let mut out = String::new();
    out.push_str(&format!("module {}(\n", module_name));
    out.push_str(
        &ports
            .iter()
            .map(|p| format!("  {}", p))
            .collect::<Vec<_>>()
            .join(",\n"),
    );
    out.push_str("\n);\n");

    out.push_str(&format!("  wire {};\n", constants.zero));
    out.push_str(&format!("  assign {} = 1'b0;\n", constants.zero));
    out.push_str(&format!("  wire {};\n", constants.one));
    out.push_str(&format!("  assign {} = 1'b1;\n", constants.one));

    for (index, instance) in network.instances.iter().enumerate() {
        for output in instance.outputs() {
            let name = output.to_string();
            out.push_str(&format!("  wire {};\n", name));
            names.insert(output, name);
        }
        let connections: Vec<String> = instance
            .port_bindings()
            .into_iter()
            .map(|(port, signal)| {
                let net = names
                    .get(&signal)
                    .cloned()
                    .unwrap_or_else(|| signal.to_string());
                format!(".{}({})", port, net)
            })
            .collect();
        out.push_str(&format!(
            "  {} u{} ({});\n",
            cell_names.name_for(instance.kind()),
            index,
            connections.join(", ")
        ));
    }

    for (i, bit) in network.result_bits.iter().enumerate() {
        let net = names.get(bit).cloned().unwrap_or_else(|| bit.to_string());
        out.push_str(&format!("  assign y_{} = {};\n", i, net));
    }
    out.push_str("endmodule\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::lower;
    use crate::network::SignalAllocator;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_emit_one_bit_increment() {
        let allocator = SignalAllocator::new();
        let constants = allocator.fresh_constants();
        let descriptor = OpDescriptor {
            op: ArithOp::Increment {
                a: Operand::fresh(&allocator, 1, false),
                literal: None,
            },
            result_width: 1,
        };
        let network = lower(&descriptor, &constants, &allocator).unwrap();
        let netlist = emit_netlist(
            "inc1",
            &descriptor,
            &network,
            &constants,
            &CellNames::default(),
        );
        assert_eq!(
            netlist,
            "module inc1(
  input wire a_0,
  output wire y_0
);
  wire n0;
  assign n0 = 1'b0;
  wire n1;
  assign n1 = 1'b1;
  wire n3;
  wire n4;
  HA u0 (.A(a_0), .B(n1), .SUM(n3), .COUT(n4));
  assign y_0 = n3;
endmodule
"
        );
    }

    #[test]
    fn test_emit_uses_configured_cell_names() {
        let allocator = SignalAllocator::new();
        let constants = allocator.fresh_constants();
        let descriptor = OpDescriptor {
            op: ArithOp::Subtract {
                a: Operand::fresh(&allocator, 1, false),
                b: Operand::fresh(&allocator, 1, false),
            },
            result_width: 1,
        };
        let network = lower(&descriptor, &constants, &allocator).unwrap();
        let cell_names = CellNames {
            half_adder: "HAX1".to_string(),
            or2: "OR2X1".to_string(),
            not: "INVX1".to_string(),
        };
        let netlist = emit_netlist("sub1", &descriptor, &network, &constants, &cell_names);
        assert!(netlist.contains("  INVX1 u0 (.A(b_0), .Y(n4));\n"), "{}", netlist);
        assert_eq!(netlist.matches("HAX1 ").count(), 2);
        assert_eq!(netlist.matches("OR2X1 ").count(), 1);
    }
}
