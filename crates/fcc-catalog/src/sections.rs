//! # Section Catalog
//!
//! The six checklist sections and their weighted questions. Each section is
//! a `static` item; [`section`] maps a [`SectionId`] to it with an
//! exhaustive match, so a new section id cannot be added without content.
//!
//! Question ids are unique across all sections. Text references follow
//! `questions.<section>.<id>.question` / `.help`, section titles
//! `assessment.sections.<section>`.

use serde::Serialize;

use fcc_core::SectionId;

/// A weighted checklist question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Globally unique question id.
    pub id: &'static str,
    /// Owning section.
    pub section: SectionId,
    /// Contribution to the section's score denominator. Always positive.
    pub weight: u32,
}

impl Question {
    /// Text key for the question prompt.
    pub fn question_key(&self) -> String {
        format!("questions.{}.{}.question", self.section, self.id)
    }

    /// Text key for the question's help text.
    pub fn help_key(&self) -> String {
        format!("questions.{}.{}.help", self.section, self.id)
    }
}

/// A checklist section with its ordered questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub title_key: &'static str,
    pub questions: &'static [Question],
}

impl Section {
    /// Sum of all question weights in this section.
    pub fn total_weight(&self) -> u32 {
        self.questions.iter().map(|q| q.weight).sum()
    }

    /// Look up one of this section's questions by id.
    pub fn question(&self, id: &str) -> Option<&'static Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

const fn q(section: SectionId, id: &'static str, weight: u32) -> Question {
    Question {
        id,
        section,
        weight,
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

static LABELING: Section = Section {
    id: SectionId::Labeling,
    title_key: "assessment.sections.labeling",
    questions: &[
        q(SectionId::Labeling, "nutritionFacts", 15),
        q(SectionId::Labeling, "ingredientList", 15),
        q(SectionId::Labeling, "allergenDeclaration", 20),
        q(SectionId::Labeling, "netQuantity", 10),
        q(SectionId::Labeling, "manufacturerInfo", 10),
        q(SectionId::Labeling, "countryOfOrigin", 10),
    ],
};

static FACILITY: Section = Section {
    id: SectionId::Facility,
    title_key: "assessment.sections.facility",
    questions: &[
        q(SectionId::Facility, "fdaRegistration", 25),
        q(SectionId::Facility, "priorNotice", 20),
        q(SectionId::Facility, "fsvp", 15),
    ],
};

static SAFETY: Section = Section {
    id: SectionId::Safety,
    title_key: "assessment.sections.safety",
    questions: &[
        q(SectionId::Safety, "haccp", 15),
        q(SectionId::Safety, "fsma", 20),
        q(SectionId::Safety, "gmp", 15),
        q(SectionId::Safety, "hazardAnalysis", 10),
    ],
};

static USDA: Section = Section {
    id: SectionId::Usda,
    title_key: "assessment.sections.usda",
    questions: &[
        q(SectionId::Usda, "fsisEstablishment", 25),
        q(SectionId::Usda, "countryEligibility", 20),
        q(SectionId::Usda, "labelApproval", 25),
    ],
};

static COLD_CHAIN: Section = Section {
    id: SectionId::ColdChain,
    title_key: "assessment.sections.coldChain",
    questions: &[
        q(SectionId::ColdChain, "temperatureControl", 20),
        q(SectionId::ColdChain, "temperatureMonitoring", 20),
        q(SectionId::ColdChain, "coldChainTransport", 15),
    ],
};

static SHELF_LIFE: Section = Section {
    id: SectionId::ShelfLife,
    title_key: "assessment.sections.shelfLife",
    questions: &[
        q(SectionId::ShelfLife, "dateMarking", 15),
        q(SectionId::ShelfLife, "shelfLifeValidation", 10),
        q(SectionId::ShelfLife, "storageInstructions", 15),
    ],
};

/// The catalog entry for a section.
pub fn section(id: SectionId) -> &'static Section {
    match id {
        SectionId::Labeling => &LABELING,
        SectionId::Facility => &FACILITY,
        SectionId::Safety => &SAFETY,
        SectionId::Usda => &USDA,
        SectionId::ColdChain => &COLD_CHAIN,
        SectionId::ShelfLife => &SHELF_LIFE,
    }
}

/// Every question in canonical section order.
pub fn all_questions() -> impl Iterator<Item = &'static Question> {
    SectionId::all()
        .iter()
        .flat_map(|id| section(*id).questions.iter())
}

/// Look up a question by id across all sections.
pub fn question(id: &str) -> Option<&'static Question> {
    all_questions().find(|q| q.id == id)
}
