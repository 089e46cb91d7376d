use crate::{Attachment, AttachmentID, Grip, Machine, MachineID};

/// Fully disambiguated exercise choice.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseVariant {
    pub machine_id: MachineID,
    pub machine_name: String,
    pub attachment: Option<VariantAttachment>,
    /// Only set if the attachment offers more than one grip.
    pub grip: Option<Grip>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantAttachment {
    pub id: AttachmentID,
    pub name: String,
}

impl ExerciseVariant {
    /// Display label, e.g. "Tricep Pushdown — Rope" or "Lat Pulldown — Wide Bar (Pronated)".
    #[must_use]
    pub fn label(&self) -> String {
        match (&self.attachment, self.grip) {
            (None, _) => self.machine_name.clone(),
            (Some(attachment), None) => format!("{} — {}", self.machine_name, attachment.name),
            (Some(attachment), Some(grip)) => {
                format!("{} — {} ({grip})", self.machine_name, attachment.name)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(ExerciseVariant),
    NeedsAttachment,
    NeedsGrip,
}

/// Number of distinct variants a machine offers.
#[must_use]
pub fn variant_count(machine: &Machine) -> usize {
    if machine.attachments.is_empty() {
        1
    } else {
        machine.attachments.iter().map(|a| a.grips.len()).sum()
    }
}

/// Resolve the variant selected by the given choices.
///
/// Choices which are implied by the machine are filled in automatically: a
/// single attachment is always used, and a single grip of the used attachment
/// never needs to be chosen. Choices the machine does not offer count as
/// missing.
#[must_use]
pub fn resolve_variant(
    machine: &Machine,
    attachment: Option<&AttachmentID>,
    grip: Option<Grip>,
) -> Resolution {
    let attachment = match machine.attachments.as_slice() {
        [] => return Resolution::Resolved(variant(machine, None, None)),
        [only] => only,
        _ => match attachment.and_then(|id| machine.attachment(id)) {
            Some(attachment) => attachment,
            None => return Resolution::NeedsAttachment,
        },
    };

    match attachment.grips.as_slice() {
        [_] => Resolution::Resolved(variant(machine, Some(attachment), None)),
        grips => match grip.filter(|g| grips.contains(g)) {
            Some(grip) => Resolution::Resolved(variant(machine, Some(attachment), Some(grip))),
            None => Resolution::NeedsGrip,
        },
    }
}

fn variant(machine: &Machine, attachment: Option<&Attachment>, grip: Option<Grip>) -> ExerciseVariant {
    ExerciseVariant {
        machine_id: machine.id.clone(),
        machine_name: machine.name.clone(),
        attachment: attachment.map(|a| VariantAttachment {
            id: a.id.clone(),
            name: a.name.clone(),
        }),
        grip,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::CATALOG;

    fn machine(id: &str) -> &'static Machine {
        CATALOG.machine(&id.into()).unwrap()
    }

    #[rstest]
    #[case("bench-press", 1)]
    #[case("seated-row", 1)]
    #[case("cable-curl", 2)]
    #[case("lat-pulldown", 3)]
    #[case("tricep-pushdown", 4)]
    #[case("pull-up-station", 4)]
    fn test_variant_count(#[case] machine_id: &str, #[case] expected: usize) {
        assert_eq!(variant_count(machine(machine_id)), expected);
    }

    #[test]
    fn test_resolve_variant_without_attachments() {
        assert_eq!(
            resolve_variant(machine("bench-press"), None, None),
            Resolution::Resolved(ExerciseVariant {
                machine_id: "bench-press".into(),
                machine_name: "Bench Press".to_string(),
                attachment: None,
                grip: None,
            })
        );
    }

    #[test]
    fn test_resolve_variant_single_attachment_single_grip() {
        let Resolution::Resolved(variant) = resolve_variant(machine("seated-row"), None, None)
        else {
            panic!("variant not resolved");
        };
        assert_eq!(variant.label(), "Seated Cable Row — V-Handle");
        assert_eq!(variant.grip, None);
    }

    #[test]
    fn test_resolve_variant_single_attachment_multiple_grips() {
        assert_eq!(
            resolve_variant(machine("cable-curl"), None, None),
            Resolution::NeedsGrip
        );
        assert_eq!(
            resolve_variant(machine("cable-curl"), None, Some(Grip::Neutral)),
            Resolution::NeedsGrip
        );
        let Resolution::Resolved(variant) =
            resolve_variant(machine("cable-curl"), None, Some(Grip::Supinated))
        else {
            panic!("variant not resolved");
        };
        assert_eq!(variant.label(), "Cable Curl — EZ Bar (Supinated)");
    }

    #[rstest]
    #[case::nothing_chosen(None, None, None)]
    #[case::grip_without_attachment(None, Some(Grip::Neutral), None)]
    #[case::unknown_attachment(Some("wide-bar"), None, None)]
    #[case::single_grip_attachment(Some("rope"), None, Some("Tricep Pushdown — Rope"))]
    #[case::ignored_grip(Some("rope"), Some(Grip::Pronated), Some("Tricep Pushdown — Rope"))]
    #[case::missing_grip(Some("straight-bar"), None, None)]
    #[case::grip_not_offered(Some("straight-bar"), Some(Grip::Neutral), None)]
    #[case::grip_chosen(
        Some("straight-bar"),
        Some(Grip::Pronated),
        Some("Tricep Pushdown — Straight Bar (Pronated)")
    )]
    fn test_resolve_variant_multiple_attachments(
        #[case] attachment: Option<&str>,
        #[case] grip: Option<Grip>,
        #[case] expected_label: Option<&str>,
    ) {
        let attachment = attachment.map(AttachmentID::from);
        let resolution = resolve_variant(machine("tricep-pushdown"), attachment.as_ref(), grip);
        match expected_label {
            Some(label) => {
                assert!(matches!(&resolution, Resolution::Resolved(v) if v.label() == label));
            }
            None => {
                assert!(matches!(
                    resolution,
                    Resolution::NeedsAttachment | Resolution::NeedsGrip
                ));
            }
        }
    }

    #[test]
    fn test_resolve_variant_reports_missing_choice() {
        let lat_pulldown = machine("lat-pulldown");
        assert_eq!(
            resolve_variant(lat_pulldown, None, Some(Grip::Pronated)),
            Resolution::NeedsAttachment
        );
        assert_eq!(
            resolve_variant(lat_pulldown, Some(&"wide-bar".into()), None),
            Resolution::NeedsGrip
        );
    }
}
