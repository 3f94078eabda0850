//! Business guidance
//!
//! Static advice for publishers, developers and investors drawn from the
//! sales analysis, shown next to the mined association rules.

use std::fmt;
use std::str::FromStr;

/// Audience a block of guidance is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuidanceSection {
    Strategic,
    Publisher,
    Developer,
    Investor,
    Rules,
}

impl GuidanceSection {
    pub const ALL: [GuidanceSection; 5] = [
        GuidanceSection::Strategic,
        GuidanceSection::Publisher,
        GuidanceSection::Developer,
        GuidanceSection::Investor,
        GuidanceSection::Rules,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GuidanceSection::Strategic => "strategic",
            GuidanceSection::Publisher => "publisher",
            GuidanceSection::Developer => "developer",
            GuidanceSection::Investor => "investor",
            GuidanceSection::Rules => "rules",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GuidanceSection::Strategic => "Strategic Insights",
            GuidanceSection::Publisher => "For Publishers",
            GuidanceSection::Developer => "For Developers",
            GuidanceSection::Investor => "For Investors",
            GuidanceSection::Rules => "Association Rules",
        }
    }
}

impl fmt::Display for GuidanceSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GuidanceSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let wanted = wanted.strip_suffix('s').unwrap_or(&wanted);
        GuidanceSection::ALL
            .into_iter()
            .find(|section| section.name().trim_end_matches('s') == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = GuidanceSection::ALL.iter().map(|s| s.name()).collect();
                format!("unknown section '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// Titled list of points
#[derive(Debug, Clone, Copy)]
pub struct Insight {
    pub title: &'static str,
    pub points: &'static [&'static str],
}

/// One prioritised action item
#[derive(Debug, Clone, Copy)]
pub struct ActionItem {
    pub priority: Priority,
    pub title: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// Direction an investor indicator is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Stable,
    Down,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "^",
            Trend::Stable => "->",
            Trend::Down => "v",
        }
    }
}

pub const STRATEGIC: [Insight; 4] = [
    Insight {
        title: "High Sales Potential",
        points: &[
            "Action and Sports genres consistently show strong sales performance",
            "Focus on North America and Europe as primary markets (85%+ of global sales)",
            "Target Critic Score above 75 for better commercial success",
            "Platform choice matters: PS3, X360, PS4 show highest average sales",
        ],
    },
    Insight {
        title: "Market Trends",
        points: &[
            "The gaming market has evolved significantly from 2000-2016",
            "Multi-platform releases maximize market reach",
            "Digital distribution is changing the sales landscape",
            "Mobile gaming and indie titles are emerging segments",
        ],
    },
    Insight {
        title: "Success Factors",
        points: &[
            "High critic scores correlate with better sales than user scores",
            "Established IPs and franchises have higher success rates",
            "Marketing timing and seasonal releases impact performance",
            "Publisher reputation affects initial sales momentum",
        ],
    },
    Insight {
        title: "Risk Factors",
        points: &[
            "Niche genres have lower average sales but dedicated audiences",
            "Over-saturated genres face higher competition",
            "Japan market preferences differ significantly from Western markets",
            "Late platform releases may miss peak user base",
        ],
    },
];

pub const PUBLISHER_ACTIONS: [ActionItem; 5] = [
    ActionItem {
        priority: Priority::High,
        title: "Optimize Genre-Platform Combinations",
        detail: "Certain genre-platform combinations yield significantly higher average sales. \
                 Action games on PlayStation platforms and Sports games on Xbox perform consistently well.",
    },
    ActionItem {
        priority: Priority::High,
        title: "Focus on Critic Scores",
        detail: "Games with Critic Score > 80 have 3x higher average sales. Invest in quality \
                 assurance and polish before release.",
    },
    ActionItem {
        priority: Priority::Medium,
        title: "Regional Localization Strategy",
        detail: "Japan prefers different genres (RPG, Fighting) than Western markets (Action, Shooter). \
                 Customize marketing and features for each region.",
    },
    ActionItem {
        priority: Priority::Medium,
        title: "Release Timing Optimization",
        detail: "Q4 releases capture holiday sales but face more competition. Consider Q1-Q2 for \
                 less competitive launches.",
    },
    ActionItem {
        priority: Priority::Low,
        title: "Build IP Value",
        detail: "Successful franchises have higher average sales than new IPs. Favour games with \
                 sequel and expansion potential.",
    },
];

pub const DEVELOPER: [Insight; 3] = [
    Insight {
        title: "Game Design",
        points: &[
            "Action and Sports genres have proven market demand",
            "Balance innovation with familiar mechanics",
            "Consider cross-platform development for wider reach",
            "Quality over quantity: polished games sell better",
        ],
    },
    Insight {
        title: "Target Audience",
        points: &[
            "Understand regional preferences (Western vs Japan)",
            "Hardcore vs casual audience considerations",
            "Age ratings affect market size",
            "Community engagement drives long-term success",
        ],
    },
    Insight {
        title: "Development Strategy",
        points: &[
            "Set realistic scope based on market expectations",
            "Plan for post-launch content and updates",
            "Build for the current generation platforms",
            "Consider early access for community feedback",
        ],
    },
];

/// Investor indicators; model accuracy is filled in from metadata
pub const INVESTOR_INDICATORS: [(&str, &str, Trend); 5] = [
    ("High Success Rate Genres", "Action, Sports, Shooter", Trend::Up),
    ("Key Markets", "NA (45%), EU (28%), JP (12%)", Trend::Up),
    ("Avg Sales (Critic Score > 80)", "2.5M+ units", Trend::Up),
    ("Platform Leaders", "PlayStation, Xbox, Nintendo", Trend::Stable),
    ("Risk Factor", "New IP vs Franchise", Trend::Down),
];

pub const LOW_RISK: Insight = Insight {
    title: "Low Risk Indicators",
    points: &[
        "Established franchise with proven track record",
        "Experienced development team",
        "Target Critic Score > 75",
        "Multi-platform release strategy",
        "Strong publisher backing",
        "Action/Sports/Shooter genre",
    ],
};

pub const HIGH_RISK: Insight = Insight {
    title: "High Risk Indicators",
    points: &[
        "New IP with unproven concept",
        "Niche genre with limited audience",
        "Single platform exclusive",
        "Crowded release window",
        "Inexperienced development team",
        "Japan-only target market",
    ],
};

/// Return outlook for a sales cluster, by cluster id
pub fn roi_outlook(cluster: &str) -> &'static str {
    match cluster {
        "0" => "Highest ROI potential with global sales > 5M. Rare but extremely profitable.",
        "1" => "Strong ROI with sales 2-5M. Good investment target.",
        "2" => "Moderate returns with sales 1-2M. Lower risk.",
        _ => "Limited ROI with sales < 1M. High risk.",
    }
}
