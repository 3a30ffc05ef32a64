//! Built-in admission vocabulary.
//!
//! These lists are the authoritative baseline; `FilterConfig` entries extend
//! them at startup. Keywords are matched whole-word and case-insensitively
//! with no stemming, so common plural forms are listed explicitly. Patterns
//! are regular expressions.

/// Manufacturing and industrial domain keywords.
pub(crate) const MANUFACTURING_KEYWORDS: &[&str] = &[
    // Core manufacturing terms
    "production",
    "manufacturing",
    "factory",
    "plant",
    "assembly",
    "fabrication",
    "machining",
    "processing",
    "automation",
    "robotics",
    "cnc",
    "machinery",
    // Quality and efficiency
    "quality",
    "defects",
    "defect",
    "efficiency",
    "productivity",
    "performance",
    "yield",
    "waste",
    "scrap",
    "rework",
    "inspection",
    "testing",
    "compliance",
    "standards",
    "iso",
    "lean",
    "six sigma",
    "kaizen",
    "continuous improvement",
    // Operations and logistics
    "operations",
    "workflow",
    "process",
    "procedure",
    "schedule",
    "planning",
    "inventory",
    "supply chain",
    "logistics",
    "warehouse",
    "distribution",
    "shipping",
    "receiving",
    "procurement",
    "sourcing",
    "vendor",
    "supplier",
    // Equipment and maintenance
    "equipment",
    "machine",
    "machines",
    "tool",
    "tools",
    "maintenance",
    "repair",
    "downtime",
    "uptime",
    "breakdown",
    "preventive",
    "predictive",
    "calibration",
    "oee",
    "overall equipment effectiveness",
    // Personnel and shifts
    "operator",
    "operators",
    "technician",
    "technicians",
    "supervisor",
    "foreman",
    "shift",
    "shifts",
    "worker",
    "workers",
    "employee",
    "employees",
    "team",
    "crew",
    "training",
    "skill",
    "safety",
    // Metrics and KPIs
    "kpi",
    "kpis",
    "metric",
    "metrics",
    "target",
    "targets",
    "goal",
    "goals",
    "benchmark",
    "benchmarks",
    "baseline",
    "trend",
    "trends",
    "analysis",
    "report",
    "reports",
    "dashboard",
    "monitoring",
    "tracking",
    // Materials and components
    "material",
    "materials",
    "component",
    "components",
    "part",
    "parts",
    "raw material",
    "finished goods",
    "batch",
    "lot",
    "serial number",
    "bom",
    "bill of materials",
    // Data analysis terms
    "data",
    "chart",
    "charts",
    "graph",
    "graphs",
    "visualization",
    "statistics",
    "correlation",
    "correlations",
    "pattern",
    "patterns",
    "insight",
    "insights",
    "summary",
    "overview",
    "comparison",
    "ranking",
    "top performers",
    "bottom performers",
    "outliers",
    "anomalies",
];

/// Data-analysis and visualization keywords. These form a second allow tier:
/// a query phrased purely in analysis vocabulary ("show me a chart of the
/// data") is in-scope even without an explicit manufacturing term.
pub(crate) const ANALYSIS_KEYWORDS: &[&str] = &[
    "show",
    "display",
    "plot",
    "chart",
    "graph",
    "visualize",
    "analyze",
    "compare",
    "trend",
    "trends",
    "pattern",
    "patterns",
    "correlation",
    "correlations",
    "summary",
    "overview",
    "top",
    "bottom",
    "best",
    "worst",
    "highest",
    "lowest",
    "average",
    "total",
    "count",
    "percentage",
    "percentages",
    "rate",
    "rates",
    "ratio",
    "ratios",
    "distribution",
    "distributions",
    "frequency",
    "range",
    "variance",
    "standard deviation",
    "median",
    "quartile",
    "percentile",
    "outlier",
    "outliers",
    "anomaly",
    "anomalies",
    "insight",
    "insights",
    "performers",
    "performance",
    "ranking",
    "comparison",
];

/// Unsafe content patterns. A match here rejects the query regardless of any
/// domain keyword present.
pub(crate) const UNSAFE_PATTERNS: &[&str] = &[
    // NSFW content
    r"\b(sex|sexual|porn|nude|naked|explicit)\b",
    r"\b(adult|xxx|erotic|intimate)\b",
    // Violence and harmful content
    r"\b(kill|murder|violence|weapon|bomb|terrorist)\b",
    r"\b(suicide|self-harm|hurt|pain|torture)\b",
    // Illegal activities
    r"\b(drugs|illegal|criminal|hack|steal|fraud)\b",
    r"\b(piracy|copyright|crack|bypass)\b",
    // Personal information requests
    r"\b(password|credit card|ssn|social security|bank account)\b",
    r"\b(phone number|address|email|personal)\b",
];

/// Known off-domain topic patterns. A match here rejects the query even when a
/// domain keyword also happens to appear.
pub(crate) const IRRELEVANT_PATTERNS: &[&str] = &[
    // Entertainment
    r"\b(movie|film|music|song|celebrity|actor|actress)\b",
    r"\b(game|gaming|video game|sport|football|basketball)\b",
    // Social media and personal
    r"\b(facebook|twitter|instagram|tiktok|social media)\b",
    r"\b(dating|relationship|friendship|personal life)\b",
    // Food and cooking
    r"\b(recipe|cooking|food|restaurant|cuisine)\b",
    // Travel and geography
    r"\b(travel|vacation|tourism|country|city|geography)\b",
    // Weather
    r"\b(weather|temperature|rain|snow|climate)\b",
    // Politics and religion
    r"\b(politics|political|religion|religious|god|church)\b",
    // Health and medical (occupational safety is domain vocabulary instead)
    r"\b(doctor|medicine|hospital|disease|symptom)\b",
    // Finance and investment (business metrics are domain vocabulary instead)
    r"\b(stock|investment|crypto|bitcoin|trading)\b",
];
