use std::fmt;

//
// ─── SUBJECT ──────────────────────────────────────────────────────────────────
//

/// Fixed curriculum categories used to bucket progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subject {
    Physics,
    Chemistry,
    Biology,
    MathematicsI,
    MathematicsII,
}

impl Subject {
    /// Every enumerated subject, in curriculum order.
    pub const ALL: [Subject; 5] = [
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::MathematicsI,
        Subject::MathematicsII,
    ];

    /// Display name, also used as the persisted progress key.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Biology => "Biology",
            Subject::MathematicsI => "Mathematics I",
            Subject::MathematicsII => "Mathematics II",
        }
    }

    /// Case-insensitive lookup against the enumerated names.
    #[must_use]
    pub fn from_name_ignore_case(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|subject| subject.name().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a caller-supplied subject to its progress key.
///
/// Enumerated subjects match case-insensitively and come back with their
/// canonical spelling. Anything else is kept verbatim as an ad-hoc key.
#[must_use]
pub fn canonical_subject(raw: &str) -> String {
    Subject::from_name_ignore_case(raw).map_or_else(|| raw.to_string(), |s| s.name().to_string())
}

//
// ─── KEYWORD DETECTION ────────────────────────────────────────────────────────
//

// Order matters: the first keyword found in the text wins.
const SUBJECT_KEYWORDS: &[(&str, Subject)] = &[
    ("physics", Subject::Physics),
    ("mechanics", Subject::Physics),
    ("electrostatics", Subject::Physics),
    ("magnetism", Subject::Physics),
    ("waves", Subject::Physics),
    ("chemistry", Subject::Chemistry),
    ("organic", Subject::Chemistry),
    ("inorganic", Subject::Chemistry),
    ("biology", Subject::Biology),
    ("genetics", Subject::Biology),
    ("cell", Subject::Biology),
    ("math", Subject::MathematicsI),
    ("maths", Subject::MathematicsI),
    ("mathematics", Subject::MathematicsI),
    ("algebra", Subject::MathematicsI),
    ("probability", Subject::MathematicsI),
    ("calculus", Subject::MathematicsII),
    ("integration", Subject::MathematicsII),
    ("differentiation", Subject::MathematicsII),
];

/// Guess the subject a free-text question is about.
#[must_use]
pub fn detect_subject(text: &str) -> Option<Subject> {
    if text.is_empty() {
        return None;
    }
    let lowered = text.to_lowercase();
    SUBJECT_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, subject)| *subject)
}
