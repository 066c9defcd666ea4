//! Static sample data standing in for a real backend.
//! Every call builds fresh owned values; callers mutate their own copies.

use serde::Serialize;

use crate::entities::{Author, Paper, Reference, ReferenceKind, Section};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Analyzing,
    Completed,
    Bookmarked,
}

/// Card on the dashboard's recent-papers panel.
#[derive(Debug, Clone, Serialize)]
pub struct RecentPaper {
    pub title: &'static str,
    pub authors: &'static str,
    pub journal: &'static str,
    pub year: i32,
    pub citations: u32,
    pub status: AnalysisStatus,
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stat {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: &'static str,
    pub change: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn short_authors(names: &[&str]) -> Vec<Author> {
    names.iter().map(|n| Author::new(*n, "")).collect()
}

/// The fixed result list shown for every search.
pub fn search_results() -> Vec<Paper> {
    vec![
        Paper {
            id: 1,
            title: "Machine Learning Applications in Healthcare: A Systematic Review and Meta-Analysis".into(),
            authors: short_authors(&["Smith, J.", "Johnson, A.", "Brown, M."]),
            journal: "Nature Medicine".into(),
            year: 2024,
            volume: None,
            issue: None,
            pages: None,
            citations: 156,
            doi: "10.1038/s41591-024-01234-5".into(),
            abstract_text: "This comprehensive review examines the current state of machine learning applications in healthcare, analyzing over 500 studies published between 2020-2024. We found significant improvements in diagnostic accuracy across multiple medical domains.".into(),
            sections: Vec::new(),
            references: Vec::new(),
            keywords: strings(&["machine learning", "healthcare", "diagnostics", "AI"]),
            relevance: Some(0.95),
        },
        Paper {
            id: 2,
            title: "Quantum Computing and Cryptography: Implications for Future Security".into(),
            authors: short_authors(&["Davis, R.", "Wilson, K."]),
            journal: "Science".into(),
            year: 2024,
            volume: None,
            issue: None,
            pages: None,
            citations: 89,
            doi: "10.1126/science.abcd1234".into(),
            abstract_text: "As quantum computing advances, traditional cryptographic methods face unprecedented challenges. This paper explores post-quantum cryptography solutions and their implementation strategies.".into(),
            sections: Vec::new(),
            references: Vec::new(),
            keywords: strings(&["quantum computing", "cryptography", "security", "post-quantum"]),
            relevance: Some(0.87),
        },
        Paper {
            id: 3,
            title: "Climate Change Impact on Global Biodiversity: A Meta-Analysis of Recent Studies".into(),
            authors: short_authors(&["Martinez, L.", "Thompson, P.", "Lee, S."]),
            journal: "Environmental Science & Policy".into(),
            year: 2023,
            volume: None,
            issue: None,
            pages: None,
            citations: 234,
            doi: "10.1016/j.envsci.2023.01.234".into(),
            abstract_text: "Our meta-analysis of 300+ studies reveals accelerating biodiversity loss across all major ecosystems. We identify key intervention strategies and policy recommendations.".into(),
            sections: Vec::new(),
            references: Vec::new(),
            keywords: strings(&["climate change", "biodiversity", "conservation", "meta-analysis"]),
            relevance: Some(0.82),
        },
    ]
}

/// The only paper the viewer knows about.
pub fn featured_paper() -> Paper {
    Paper {
        id: 1,
        title: "Machine Learning Applications in Healthcare: A Systematic Review and Meta-Analysis".into(),
        authors: vec![
            Author::new("John Smith", "Harvard Medical School"),
            Author::new("Alice Johnson", "MIT"),
            Author::new("Michael Brown", "Stanford University"),
        ],
        journal: "Nature Medicine".into(),
        year: 2024,
        volume: Some("30".into()),
        issue: Some("4".into()),
        pages: Some("456-472".into()),
        citations: 156,
        doi: "10.1038/s41591-024-01234-5".into(),
        abstract_text: "This comprehensive review examines the current state of machine learning applications in healthcare, analyzing over 500 studies published between 2020-2024. We found significant improvements in diagnostic accuracy across multiple medical domains, with particular success in radiology (average improvement of 15.3%) and pathology (average improvement of 12.8%). The review identifies key challenges including data privacy, model interpretability, and regulatory compliance. We provide recommendations for future research directions and implementation strategies.".into(),
        sections: vec![
            Section { title: "Introduction".into(), body: "Machine learning has emerged as a transformative technology in healthcare...".into() },
            Section { title: "Methods".into(), body: "We conducted a systematic review following PRISMA guidelines...".into() },
            Section { title: "Results".into(), body: "Our analysis included 523 studies from 45 countries...".into() },
            Section { title: "Discussion".into(), body: "The findings demonstrate significant potential for ML in healthcare...".into() },
            Section { title: "Conclusion".into(), body: "Machine learning applications show promise across healthcare domains...".into() },
        ],
        references: strings(&[
            "Smith, J. et al. (2023). Deep learning in medical imaging. Nature Reviews, 15(3), 234-245.",
            "Johnson, A. & Brown, M. (2022). AI ethics in healthcare. Science, 376(6589), 123-128.",
            "Davis, R. et al. (2023). Regulatory frameworks for medical AI. NEJM, 388(12), 1089-1095.",
        ]),
        keywords: strings(&["machine learning", "healthcare", "diagnostics", "AI", "medical imaging", "systematic review"]),
        relevance: None,
    }
}

/// Key findings shown in the paper viewer's sidebar.
pub fn featured_findings() -> Vec<&'static str> {
    vec![
        "15.3% improvement in radiology diagnostics",
        "12.8% improvement in pathology",
        "523 studies analyzed across 45 countries",
    ]
}

/// Seed content of the reference manager.
pub fn references() -> Vec<Reference> {
    vec![
        Reference {
            id: 1,
            title: "Machine Learning Applications in Healthcare: A Comprehensive Review".into(),
            authors: strings(&["Smith, J.", "Johnson, A.", "Brown, M."]),
            journal: "Nature Medicine".into(),
            year: 2024,
            kind: ReferenceKind::Article,
            folder: "AI in Healthcare".into(),
            tags: strings(&["machine learning", "healthcare", "review"]),
            notes: "Excellent overview of ML applications. Key findings on diagnostic accuracy improvements.".into(),
            citation: "Smith, J., Johnson, A., & Brown, M. (2024). Machine Learning Applications in Healthcare: A Comprehensive Review. Nature Medicine, 30(4), 456-472.".into(),
            doi: "10.1038/s41591-024-01234-5".into(),
        },
        Reference {
            id: 2,
            title: "Quantum Computing and Cryptography: Future Implications".into(),
            authors: strings(&["Davis, R.", "Wilson, K."]),
            journal: "Science".into(),
            year: 2024,
            kind: ReferenceKind::Article,
            folder: "Quantum Computing".into(),
            tags: strings(&["quantum", "cryptography", "security"]),
            notes: "Important insights on post-quantum cryptography challenges and solutions.".into(),
            citation: "Davis, R., & Wilson, K. (2024). Quantum Computing and Cryptography: Future Implications. Science, 384(6692), 123-128.".into(),
            doi: "10.1126/science.abcd1234".into(),
        },
        Reference {
            id: 3,
            title: "Climate Change Impact on Global Biodiversity".into(),
            authors: strings(&["Martinez, L.", "Thompson, P.", "Lee, S."]),
            journal: "Environmental Science & Policy".into(),
            year: 2023,
            kind: ReferenceKind::Article,
            folder: "Environmental Studies".into(),
            tags: strings(&["climate change", "biodiversity", "conservation"]),
            notes: "Comprehensive meta-analysis with policy recommendations.".into(),
            citation: "Martinez, L., Thompson, P., & Lee, S. (2023). Climate Change Impact on Global Biodiversity. Environmental Science & Policy, 142, 234-245.".into(),
            doi: "10.1016/j.envsci.2023.01.234".into(),
        },
    ]
}

pub fn recent_papers() -> Vec<RecentPaper> {
    vec![
        RecentPaper {
            title: "Quantum Machine Learning: Revolutionary Breakthrough in Neural Networks",
            authors: "Dr. Sarah Chen, Prof. Michael Rodriguez",
            journal: "Nature Quantum Information",
            year: 2024,
            citations: 1247,
            status: AnalysisStatus::Analyzing,
            progress: 85,
        },
        RecentPaper {
            title: "Bioengineering Immortality: CRISPR 3.0 and Cellular Regeneration",
            authors: "Dr. Elena Vasquez, Dr. James Liu",
            journal: "Cell Regeneration Today",
            year: 2024,
            citations: 892,
            status: AnalysisStatus::Completed,
            progress: 100,
        },
        RecentPaper {
            title: "Fusion Energy Breakthrough: Sustainable Power for Humanity",
            authors: "Dr. Ahmed Hassan, Dr. Lisa Thompson",
            journal: "Energy Revolution",
            year: 2024,
            citations: 2156,
            status: AnalysisStatus::Bookmarked,
            progress: 0,
        },
    ]
}

pub fn dashboard_stats() -> Vec<Stat> {
    vec![
        Stat { icon: "book-open", label: "Quantum Papers", value: "1,247", change: Some("+342%") },
        Stat { icon: "zap", label: "AI Insights", value: "15.7K", change: Some("+1,250%") },
        Stat { icon: "cpu", label: "Neural Score", value: "9.8/10", change: Some("+89%") },
        Stat { icon: "layers", label: "Dimensions", value: "∞", change: Some("∞%") },
    ]
}

pub fn landing_stats() -> Vec<Stat> {
    vec![
        Stat { icon: "book-open", label: "Research Papers", value: "220M+", change: None },
        Stat { icon: "users", label: "Active Researchers", value: "50K+", change: None },
        Stat { icon: "trending-up", label: "Accuracy Rate", value: "99.8%", change: None },
        Stat { icon: "zap", label: "Faster Research", value: "10x", change: None },
    ]
}

pub fn features() -> Vec<Feature> {
    vec![
        Feature { icon: "search", title: "AI-Powered Search", description: "Intelligent search engine that comprehends research queries and analyzes the 10 most relevant papers for comprehensive, research-backed answers." },
        Feature { icon: "book-open", title: "Literature Review", description: "Automated discovery, screening, and data extraction for research papers with in-depth analysis of trends and consensus." },
        Feature { icon: "edit", title: "AI Writing Assistant", description: "AI-driven writing tool that generates and refines academic content with automatic citations and reference integration." },
        Feature { icon: "folder", title: "Reference Management", description: "Intuitive reference manager with import capabilities from Zotero, BibTeX, RIS, DOI, and URLs with AI-generated summaries." },
        Feature { icon: "message-circle", title: "Chat with PDFs", description: "Interactive AI tools for chatting with PDFs, generating theses, paper titles, abstracts, and essay conclusions." },
        Feature { icon: "bar-chart", title: "Research Analytics", description: "Advanced analytics and visualization tools to track research trends, citations, and impact metrics across disciplines." },
        Feature { icon: "users", title: "Collaboration Tools", description: "Real-time collaboration features with shared libraries, customizable access permissions, and team research management." },
        Feature { icon: "zap", title: "Smart Summarization", description: "AI-powered summarization for articles, essays, YouTube videos, paragraphs, and sentences with key insights extraction." },
    ]
}
