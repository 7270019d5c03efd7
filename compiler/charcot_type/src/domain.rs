// Clinical record layouts. Field order is the struct layout the runtime
// expects and must not change.

use crate::types::IrType;

/// The record types that lower to IR structs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Patient,
    Medication,
    Prescription,
}

/// One struct field: its source name and IR type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordField {
    pub name: &'static str,
    pub ty: IrType,
}

const fn field(name: &'static str, ty: IrType) -> RecordField {
    RecordField { name, ty }
}

const PATIENT_FIELDS: &[RecordField] = &[
    field("id", IrType::Opaque),
    field("name", IrType::Opaque),
    field("birth", IrType::Int),
    field("weight", IrType::Float),
    field("height", IrType::Float),
    field("allergies", IrType::OpaqueArray),
];

const MEDICATION_FIELDS: &[RecordField] = &[
    field("name", IrType::Opaque),
    field("active_ingredient", IrType::Opaque),
    field("strength", IrType::Float),
    field("unit", IrType::Opaque),
];

const PRESCRIPTION_FIELDS: &[RecordField] = &[
    field("patient", IrType::Record(RecordKind::Patient)),
    field("medication", IrType::Record(RecordKind::Medication)),
    field("dose", IrType::Float),
    field("instructions", IrType::Opaque),
    field("valid_for", IrType::Int),
    field("renewals", IrType::Int),
    field("prescribed_by", IrType::Opaque),
    field("date", IrType::Int),
];

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Patient,
        RecordKind::Medication,
        RecordKind::Prescription,
    ];

    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "Patient" => Some(RecordKind::Patient),
            "Medication" => Some(RecordKind::Medication),
            "Prescription" => Some(RecordKind::Prescription),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Patient => "Patient",
            RecordKind::Medication => "Medication",
            RecordKind::Prescription => "Prescription",
        }
    }

    pub fn fields(self) -> &'static [RecordField] {
        match self {
            RecordKind::Patient => PATIENT_FIELDS,
            RecordKind::Medication => MEDICATION_FIELDS,
            RecordKind::Prescription => PRESCRIPTION_FIELDS,
        }
    }

    /// Index and type of a named field
    pub fn field(self, name: &str) -> Option<(usize, IrType)> {
        self.fields()
            .iter()
            .position(|f| f.name == name)
            .map(|index| (index, self.fields()[index].ty))
    }
}
