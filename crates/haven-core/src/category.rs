//! The resource category catalog.
//!
//! A fixed enumeration of categories, each carrying a display label, an
//! opaque icon/color tag for presentation layers, and an ordered keyword
//! list used both to build provider queries and to classify free-text
//! results. Declaration order is load-bearing: classification walks the
//! catalog in this order and the first match wins, and the "all categories"
//! fan-out processes categories in this order, which decides which
//! duplicate survives dedup.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A classification tag for a discovered resource.
///
/// Identity is the stable slug string (`Display` renders the human label).
/// `All` is the catch-all pseudo-category: it is never matched by the
/// classifier and doubles as the cache key under which free-text search
/// results accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceCategory {
    All,
    Shelter,
    Food,
    Healthcare,
    MentalHealth,
    Crisis,
    SubstanceSupport,
    DomesticViolence,
    LegalAid,
    Employment,
    Education,
    Transportation,
    Financial,
    Housing,
    Clothing,
    Hygiene,
    Childcare,
    FamilyServices,
    YouthServices,
    SeniorServices,
    Veterans,
    DisabilitySupport,
    LgbtqSupport,
    Immigration,
    WomensServices,
    Dental,
    Utilities,
    Internet,
    Pets,
}

/// Every category in declaration order. `All` is first.
pub const CATALOG: [ResourceCategory; 29] = [
    ResourceCategory::All,
    ResourceCategory::Shelter,
    ResourceCategory::Food,
    ResourceCategory::Healthcare,
    ResourceCategory::MentalHealth,
    ResourceCategory::Crisis,
    ResourceCategory::SubstanceSupport,
    ResourceCategory::DomesticViolence,
    ResourceCategory::LegalAid,
    ResourceCategory::Employment,
    ResourceCategory::Education,
    ResourceCategory::Transportation,
    ResourceCategory::Financial,
    ResourceCategory::Housing,
    ResourceCategory::Clothing,
    ResourceCategory::Hygiene,
    ResourceCategory::Childcare,
    ResourceCategory::FamilyServices,
    ResourceCategory::YouthServices,
    ResourceCategory::SeniorServices,
    ResourceCategory::Veterans,
    ResourceCategory::DisabilitySupport,
    ResourceCategory::LgbtqSupport,
    ResourceCategory::Immigration,
    ResourceCategory::WomensServices,
    ResourceCategory::Dental,
    ResourceCategory::Utilities,
    ResourceCategory::Internet,
    ResourceCategory::Pets,
];

impl ResourceCategory {
    /// Iterator over the full catalog in declaration order.
    pub fn catalog() -> impl Iterator<Item = ResourceCategory> {
        CATALOG.into_iter()
    }

    /// Stable identifier used in resource ids, cache keys, and API params.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Shelter => "shelter",
            Self::Food => "food",
            Self::Healthcare => "healthcare",
            Self::MentalHealth => "mental-health",
            Self::Crisis => "crisis",
            Self::SubstanceSupport => "substance-support",
            Self::DomesticViolence => "domestic-violence",
            Self::LegalAid => "legal-aid",
            Self::Employment => "employment",
            Self::Education => "education",
            Self::Transportation => "transportation",
            Self::Financial => "financial",
            Self::Housing => "housing",
            Self::Clothing => "clothing",
            Self::Hygiene => "hygiene",
            Self::Childcare => "childcare",
            Self::FamilyServices => "family-services",
            Self::YouthServices => "youth-services",
            Self::SeniorServices => "senior-services",
            Self::Veterans => "veterans",
            Self::DisabilitySupport => "disability-support",
            Self::LgbtqSupport => "lgbtq-support",
            Self::Immigration => "immigration",
            Self::WomensServices => "womens-services",
            Self::Dental => "dental",
            Self::Utilities => "utilities",
            Self::Internet => "internet",
            Self::Pets => "pets",
        }
    }

    /// Human-readable display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Resources",
            Self::Shelter => "Shelter",
            Self::Food => "Food Assistance",
            Self::Healthcare => "Healthcare",
            Self::MentalHealth => "Mental Health",
            Self::Crisis => "Crisis Support",
            Self::SubstanceSupport => "Substance Support",
            Self::DomesticViolence => "Domestic Violence",
            Self::LegalAid => "Legal Aid",
            Self::Employment => "Employment",
            Self::Education => "Education",
            Self::Transportation => "Transportation",
            Self::Financial => "Financial Assistance",
            Self::Housing => "Housing Assistance",
            Self::Clothing => "Clothing",
            Self::Hygiene => "Hygiene",
            Self::Childcare => "Childcare",
            Self::FamilyServices => "Family Services",
            Self::YouthServices => "Youth Services",
            Self::SeniorServices => "Senior Services",
            Self::Veterans => "Veterans Services",
            Self::DisabilitySupport => "Disability Support",
            Self::LgbtqSupport => "LGBTQ+ Support",
            Self::Immigration => "Immigration Services",
            Self::WomensServices => "Women's Services",
            Self::Dental => "Dental Care",
            Self::Utilities => "Utility Assistance",
            Self::Internet => "Internet Access",
            Self::Pets => "Pet Services",
        }
    }

    /// Opaque symbolic icon name, consumed only by presentation layers.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::All => "square.grid.2x2.fill",
            Self::Shelter => "house.fill",
            Self::Food => "fork.knife",
            Self::Healthcare => "cross.fill",
            Self::MentalHealth => "brain.head.profile",
            Self::Crisis => "exclamationmark.triangle.fill",
            Self::SubstanceSupport => "pills.fill",
            Self::DomesticViolence => "shield.fill",
            Self::LegalAid => "building.columns.fill",
            Self::Employment => "briefcase.fill",
            Self::Education => "book.fill",
            Self::Transportation => "bus.fill",
            Self::Financial => "dollarsign.circle.fill",
            Self::Housing => "key.fill",
            Self::Clothing => "tshirt.fill",
            Self::Hygiene => "shower.fill",
            Self::Childcare => "figure.and.child.holdinghands",
            Self::FamilyServices => "person.3.fill",
            Self::YouthServices => "figure.child",
            Self::SeniorServices => "figure.walk.motion",
            Self::Veterans => "medal.fill",
            Self::DisabilitySupport => "figure.roll",
            Self::LgbtqSupport => "heart.fill",
            Self::Immigration => "globe.americas.fill",
            Self::WomensServices => "figure.dress.line.vertical.figure",
            Self::Dental => "mouth.fill",
            Self::Utilities => "bolt.fill",
            Self::Internet => "wifi",
            Self::Pets => "pawprint.fill",
        }
    }

    /// Opaque display color tag (hex), consumed only by presentation layers.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::All => "#4A76D4",
            Self::Shelter => "#6A5ACD",
            Self::Food => "#2E8B57",
            Self::Healthcare => "#C0392B",
            Self::MentalHealth => "#8E44AD",
            Self::Crisis => "#E74C3C",
            Self::SubstanceSupport => "#16A085",
            Self::DomesticViolence => "#7B241C",
            Self::LegalAid => "#34495E",
            Self::Employment => "#2980B9",
            Self::Education => "#D68910",
            Self::Transportation => "#117A65",
            Self::Financial => "#1E8449",
            Self::Housing => "#5B2C6F",
            Self::Clothing => "#AF601A",
            Self::Hygiene => "#148F77",
            Self::Childcare => "#D35400",
            Self::FamilyServices => "#884EA0",
            Self::YouthServices => "#2471A3",
            Self::SeniorServices => "#A04000",
            Self::Veterans => "#1F618D",
            Self::DisabilitySupport => "#6C3483",
            Self::LgbtqSupport => "#C2185B",
            Self::Immigration => "#0E6251",
            Self::WomensServices => "#AD1457",
            Self::Dental => "#21618C",
            Self::Utilities => "#B7950B",
            Self::Internet => "#283747",
            Self::Pets => "#784212",
        }
    }

    /// Ordered lowercase keyword phrases for this category.
    ///
    /// The classifier checks only the first ten entries; the broadened
    /// single-category search OR-joins the first five; the free-text
    /// fallback scans the first five and appends the first three. Order
    /// within a list therefore matters as much as catalog order.
    #[must_use]
    pub fn search_keywords(self) -> &'static [&'static str] {
        match self {
            Self::All => &["resources", "assistance", "services", "support", "help"],
            Self::Shelter => &[
                "shelter",
                "homeless shelter",
                "emergency shelter",
                "overnight shelter",
                "warming center",
                "cooling center",
                "transitional housing",
                "homeless services",
                "rescue mission",
                "safe haven",
                "day shelter",
                "cold weather shelter",
            ],
            Self::Food => &[
                "food bank",
                "food pantry",
                "food",
                "soup kitchen",
                "free meals",
                "meal program",
                "community kitchen",
                "groceries",
                "snap benefits",
                "wic",
                "food shelf",
                "meals on wheels",
                "food distribution",
            ],
            Self::Healthcare => &[
                "clinic",
                "health center",
                "hospital",
                "free clinic",
                "community health",
                "urgent care",
                "medical",
                "doctor",
                "health services",
                "public health",
                "immunization",
                "primary care",
            ],
            Self::MentalHealth => &[
                "mental health",
                "counseling",
                "therapy",
                "therapist",
                "psychiatric",
                "psychologist",
                "behavioral health",
                "support group",
                "grief support",
                "peer support",
                "depression",
                "anxiety",
            ],
            Self::Crisis => &[
                "crisis",
                "crisis center",
                "crisis line",
                "suicide prevention",
                "emergency assistance",
                "hotline",
                "crisis intervention",
                "988",
                "mobile crisis",
                "emergency services",
                "disaster relief",
            ],
            Self::SubstanceSupport => &[
                "addiction",
                "substance abuse",
                "recovery",
                "detox",
                "rehab",
                "alcoholics anonymous",
                "narcotics anonymous",
                "sober living",
                "methadone",
                "harm reduction",
                "treatment center",
                "naloxone",
            ],
            Self::DomesticViolence => &[
                "domestic violence",
                "abuse shelter",
                "family violence",
                "victim services",
                "protective order",
                "safe house",
                "sexual assault",
                "survivor services",
                "battered",
                "restraining order",
            ],
            Self::LegalAid => &[
                "legal aid",
                "legal services",
                "lawyer",
                "attorney",
                "public defender",
                "legal clinic",
                "pro bono",
                "tenant rights",
                "eviction help",
                "expungement",
                "court help",
            ],
            Self::Employment => &[
                "job",
                "employment",
                "career center",
                "job training",
                "workforce",
                "job placement",
                "vocational",
                "resume help",
                "unemployment",
                "staffing",
                "apprenticeship",
            ],
            Self::Education => &[
                "education",
                "ged",
                "adult education",
                "literacy",
                "tutoring",
                "esl classes",
                "community college",
                "school supplies",
                "library",
                "scholarship",
                "after school",
            ],
            Self::Transportation => &[
                "transportation",
                "bus pass",
                "transit",
                "ride assistance",
                "medical transport",
                "paratransit",
                "gas voucher",
                "bus station",
                "free rides",
                "shuttle",
            ],
            Self::Financial => &[
                "financial assistance",
                "cash assistance",
                "emergency funds",
                "bill assistance",
                "tanf",
                "benefits enrollment",
                "financial counseling",
                "debt counseling",
                "tax help",
                "credit counseling",
                "payday loan alternative",
            ],
            Self::Housing => &[
                "housing assistance",
                "affordable housing",
                "rent assistance",
                "rental assistance",
                "section 8",
                "housing authority",
                "eviction prevention",
                "low income housing",
                "housing counseling",
                "subsidized housing",
                "first month rent",
            ],
            Self::Clothing => &[
                "clothing",
                "clothes closet",
                "thrift store",
                "free clothes",
                "coat drive",
                "clothing bank",
                "work clothes",
                "winter coats",
                "shoes",
                "uniform assistance",
            ],
            Self::Hygiene => &[
                "shower",
                "hygiene",
                "laundry",
                "restroom",
                "public shower",
                "hygiene kit",
                "haircut",
                "toiletries",
                "laundromat voucher",
                "day center",
            ],
            Self::Childcare => &[
                "childcare",
                "daycare",
                "child care",
                "head start",
                "preschool",
                "childcare assistance",
                "after school care",
                "early learning",
                "babysitting",
                "nursery",
            ],
            Self::FamilyServices => &[
                "family services",
                "family resource center",
                "parenting classes",
                "family support",
                "child services",
                "foster care",
                "adoption services",
                "family counseling",
                "diaper bank",
                "baby supplies",
            ],
            Self::YouthServices => &[
                "youth",
                "youth center",
                "teen",
                "runaway",
                "youth shelter",
                "boys and girls club",
                "mentoring",
                "youth program",
                "drop-in center",
                "juvenile services",
            ],
            Self::SeniorServices => &[
                "senior",
                "elderly",
                "senior center",
                "aging services",
                "senior meals",
                "elder care",
                "retirement services",
                "medicare help",
                "senior housing",
                "adult day care",
            ],
            Self::Veterans => &[
                "veteran",
                "veterans affairs",
                "va hospital",
                "veteran services",
                "vet center",
                "veterans benefits",
                "military family",
                "veteran housing",
                "american legion",
                "vfw",
            ],
            Self::DisabilitySupport => &[
                "disability",
                "disability services",
                "accessible",
                "independent living",
                "developmental disability",
                "ssi help",
                "ssdi",
                "adaptive equipment",
                "deaf services",
                "blind services",
                "special needs",
            ],
            Self::LgbtqSupport => &[
                "lgbtq",
                "lgbt center",
                "pride center",
                "gay",
                "lesbian",
                "transgender",
                "queer",
                "gender affirming",
                "lgbtq youth",
                "rainbow",
            ],
            Self::Immigration => &[
                "immigration",
                "immigrant services",
                "refugee",
                "asylum",
                "citizenship classes",
                "daca",
                "esl",
                "migrant services",
                "resettlement",
                "naturalization",
            ],
            Self::WomensServices => &[
                "women",
                "women's shelter",
                "women's center",
                "maternity",
                "pregnancy",
                "prenatal",
                "women's health",
                "doula",
                "midwife",
                "mothers",
            ],
            Self::Dental => &[
                "dental",
                "dentist",
                "dental clinic",
                "free dental",
                "oral health",
                "dental school clinic",
                "dentures",
                "tooth",
                "orthodontic",
                "dental van",
            ],
            Self::Utilities => &[
                "utility assistance",
                "electric bill",
                "water bill",
                "heating assistance",
                "liheap",
                "energy assistance",
                "weatherization",
                "gas bill",
                "utility shutoff",
                "cooling assistance",
            ],
            Self::Internet => &[
                "internet",
                "free wifi",
                "computer lab",
                "digital literacy",
                "internet access",
                "public computers",
                "broadband assistance",
                "phone assistance",
                "lifeline program",
                "device lending",
            ],
            Self::Pets => &[
                "pet food",
                "veterinary",
                "pet",
                "animal shelter",
                "low cost vet",
                "pet food bank",
                "spay neuter",
                "emergency boarding",
                "pet friendly shelter",
                "animal services",
            ],
        }
    }

    /// Pre-built provider query string, where one has been curated.
    ///
    /// Callers fall back to [`ResourceCategory::label`] when this is `None`.
    #[must_use]
    pub fn search_query(self) -> Option<&'static str> {
        match self {
            Self::All => Some("community resources assistance services"),
            Self::Shelter => Some("homeless shelter emergency housing"),
            Self::Food => Some("food bank food pantry free meals"),
            Self::Healthcare => Some("community health clinic free clinic"),
            Self::MentalHealth => Some("mental health counseling services"),
            Self::Crisis => Some("crisis center emergency assistance"),
            Self::SubstanceSupport => Some("addiction recovery treatment center"),
            Self::DomesticViolence => Some("domestic violence victim services"),
            Self::LegalAid => Some("legal aid free legal services"),
            Self::Employment => Some("job training career center workforce"),
            Self::Education => Some("adult education ged literacy"),
            Self::Transportation => Some("transportation assistance transit"),
            Self::Financial => Some("financial assistance emergency funds"),
            Self::Housing => Some("housing assistance rent assistance"),
            Self::Clothing => Some("clothing bank free clothes"),
            Self::Hygiene => Some("public shower hygiene services laundry"),
            Self::Childcare => Some("childcare assistance head start daycare"),
            Self::FamilyServices => Some("family resource center family support"),
            Self::YouthServices => Some("youth center teen services"),
            Self::SeniorServices => Some("senior center aging services"),
            Self::Veterans => Some("veterans services vet center"),
            Self::DisabilitySupport => Some("disability services independent living"),
            Self::LgbtqSupport => Some("lgbtq community center"),
            Self::Immigration => Some("immigrant refugee services"),
            Self::WomensServices => Some("women's center women's shelter"),
            Self::Dental => Some("free dental clinic"),
            Self::Utilities => Some("utility assistance energy assistance"),
            // Recent additions without a curated query yet; callers use the label.
            Self::Internet | Self::Pets => None,
        }
    }
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ResourceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| format!("unknown resource category: '{s}'"))
    }
}
