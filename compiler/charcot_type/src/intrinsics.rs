// Signatures of the runtime functions generated code may call.

use crate::domain::RecordKind;
use crate::types::IrType;

const PATIENT: IrType = IrType::Record(RecordKind::Patient);
const MEDICATION: IrType = IrType::Record(RecordKind::Medication);

/// A runtime function the IR declares up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intrinsic {
    pub name: &'static str,
    pub ret: IrType,
    pub params: &'static [IrType],
}

const fn intrinsic(name: &'static str, ret: IrType, params: &'static [IrType]) -> Intrinsic {
    Intrinsic { name, ret, params }
}

/// Every runtime intrinsic, in declaration order.
pub const INTRINSICS: &[Intrinsic] = &[
    intrinsic("verify_interaction", IrType::Bool, &[IrType::OpaqueArray, MEDICATION]),
    intrinsic("verify_allergies", IrType::Bool, &[IrType::OpaqueArray, MEDICATION]),
    intrinsic("verify_dosage", IrType::Bool, &[PATIENT, MEDICATION, IrType::Float]),
    intrinsic(
        "log_administration",
        IrType::Void,
        &[PATIENT, MEDICATION, IrType::Float, IrType::Int],
    ),
    intrinsic("string_concat", IrType::Opaque, &[IrType::Opaque, IrType::Opaque]),
    intrinsic("get_current_timestamp", IrType::Int, &[]),
    intrinsic("get_medication_by_name", MEDICATION, &[IrType::Opaque]),
    intrinsic("array_size", IrType::Int, &[IrType::OpaqueArray]),
    intrinsic("array_get", IrType::Opaque, &[IrType::OpaqueArray, IrType::Int]),
    intrinsic(
        "array_set",
        IrType::Void,
        &[IrType::OpaqueArray, IrType::Int, IrType::Opaque],
    ),
    intrinsic("create_array", IrType::OpaqueArray, &[IrType::Int]),
    intrinsic("values_equal", IrType::Bool, &[IrType::Opaque, IrType::Opaque]),
    intrinsic("date_to_timestamp", IrType::Int, &[IrType::Opaque]),
    intrinsic("create_patient", PATIENT, &[]),
    intrinsic(
        "prescribe",
        IrType::Void,
        &[PATIENT, MEDICATION, IrType::Float, IrType::Opaque, IrType::Int],
    ),
];

impl Intrinsic {
    /// `declare <ret> @<name>(<params>)`
    pub fn declaration(&self) -> String {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        format!("declare {} @{}({})", self.ret, self.name, params.join(", "))
    }
}
