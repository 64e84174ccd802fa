//! Text form of gate sequences: `h@0, x@1, cx@0:1, rx(90)@0`.
//!
//! Rotation angles are written in degrees and converted to radians here.
use crate::core::error::{Result, SimError};
use crate::core::gates::{Gate, OneQubit};

fn parse_qubit(text: &str, token: &str) -> Result<usize> {
    text.trim()
        .parse::<usize>()
        .map_err(|_| SimError::format(format!("bad qubit index '{text}' in '{token}'")))
}

fn parse_angle(text: &str, token: &str) -> Result<f64> {
    let deg = text
        .trim()
        .parse::<f64>()
        .map_err(|_| SimError::format(format!("bad angle '{text}' in '{token}'")))?;
    if !deg.is_finite() {
        return Err(SimError::format(format!("angle in '{token}' is not finite")));
    }
    Ok(deg.to_radians())
}

/// Parse one gate token.
pub fn parse_gate(token: &str) -> Result<Gate> {
    let token = token.trim();
    let (head, targets) = token
        .split_once('@')
        .ok_or_else(|| SimError::format(format!("'{token}' is missing '@qubit'")))?;
    let head = head.trim().to_ascii_lowercase();

    let (name, angle) = match head.split_once('(') {
        Some((name, rest)) => {
            let inner = rest
                .strip_suffix(')')
                .ok_or_else(|| SimError::format(format!("unclosed '(' in '{token}'")))?;
            (name.trim().to_string(), Some(parse_angle(inner, token)?))
        }
        None => (head.clone(), None),
    };

    let qubits: Vec<usize> = targets
        .split(':')
        .map(|q| parse_qubit(q, token))
        .collect::<Result<_>>()?;

    let needs_angle = matches!(name.as_str(), "rx" | "ry" | "rz");
    if needs_angle != angle.is_some() {
        return Err(SimError::format(if needs_angle {
            format!("'{name}' needs an angle in degrees, e.g. {name}(90)@0")
        } else {
            format!("'{name}' takes no angle")
        }));
    }

    let kind = match name.as_str() {
        "id" | "i" => Some(OneQubit::I),
        "x" => Some(OneQubit::X),
        "y" => Some(OneQubit::Y),
        "z" => Some(OneQubit::Z),
        "h" => Some(OneQubit::H),
        "s" => Some(OneQubit::S),
        "t" => Some(OneQubit::T),
        "rx" => angle.map(OneQubit::Rx),
        "ry" => angle.map(OneQubit::Ry),
        "rz" => angle.map(OneQubit::Rz),
        _ => None,
    };

    match (kind, qubits.as_slice()) {
        (Some(kind), [q]) => Ok(Gate::single(kind, *q)),
        (Some(_), _) => Err(SimError::format(format!("'{name}' acts on one qubit: '{token}'"))),
        (None, [a, b]) => match name.as_str() {
            "cx" | "cnot" => Ok(Gate::cx(*a, *b)),
            "cz" => Ok(Gate::cz(*a, *b)),
            "swap" => Ok(Gate::swap(*a, *b)),
            other => Err(SimError::format(format!("unknown gate '{other}'"))),
        },
        (None, _) => match name.as_str() {
            "cx" | "cnot" | "cz" | "swap" => {
                Err(SimError::format(format!("'{name}' needs two qubits as a:b in '{token}'")))
            }
            other => Err(SimError::format(format!("unknown gate '{other}'"))),
        },
    }
}

/// Parse a comma- or semicolon-separated gate list. Empty entries are skipped.
pub fn parse_gate_list(text: &str) -> Result<Vec<Gate>> {
    text.split([',', ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(parse_gate)
        .collect()
}
