//! Keyword response classifier.
//!
//! A message is lowercased and checked against an ordered list of
//! [`Rule`]s. The first rule with any trigger substring present in the
//! message wins; if none match, the fallback rule answers. Rule order is
//! the only tie-breaker between overlapping triggers (`work` appears in
//! both the projects and the hiring rule, so hiring never sees it).

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::knowledge::KnowledgeBase;
use crate::message::{ChatReply, ChatRequest};

/// Identifies the rule that produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Projects,
    Skills,
    Education,
    Contact,
    MachineLearning,
    Hiring,
    Greeting,
    General,
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Topic::Projects => "projects",
            Topic::Skills => "skills",
            Topic::Education => "education",
            Topic::Contact => "contact",
            Topic::MachineLearning => "machine_learning",
            Topic::Hiring => "hiring",
            Topic::Greeting => "greeting",
            Topic::General => "general",
        };
        f.write_str(s)
    }
}

/// One (trigger set, template) pair.
#[derive(Debug)]
pub struct Rule {
    pub topic: Topic,
    /// Lowercase substrings, any of which activates the rule
    pub triggers: &'static [&'static str],
    pub confidence: f64,
    pub suggestions: &'static [&'static str],
    compose: fn(&KnowledgeBase) -> String,
}

impl Rule {
    /// Whether any trigger occurs in an already-lowercased message.
    pub fn matches(&self, normalized: &str) -> bool {
        self.triggers.iter().any(|t| normalized.contains(t))
    }

    /// Build this rule's reply from the knowledge base.
    pub fn reply(&self, kb: &KnowledgeBase) -> ChatReply {
        ChatReply {
            response: (self.compose)(kb),
            confidence: self.confidence,
            suggestions: self.suggestions.iter().map(|s| s.to_string()).collect(),
            topic: self.topic,
        }
    }
}

/// Evaluation order is significant; see the module docs.
static RULES: [Rule; 7] = [
    Rule {
        topic: Topic::Projects,
        triggers: &["project", "work"],
        confidence: 0.95,
        suggestions: &[
            "Tell me about the Movie Recommendation System",
            "How does the Crop Prediction work?",
            "What technologies did you use?",
        ],
        compose: compose_projects,
    },
    Rule {
        topic: Topic::Skills,
        triggers: &["skill", "technology", "programming"],
        confidence: 0.92,
        suggestions: &[
            "What's your experience with Machine Learning?",
            "Tell me about your development process",
            "Which technologies are you learning?",
        ],
        compose: compose_skills,
    },
    Rule {
        topic: Topic::Education,
        triggers: &["education", "university", "study"],
        confidence: 0.90,
        suggestions: &[
            "What's your major?",
            "Tell me about your university projects",
            "How has your education influenced your projects?",
        ],
        compose: compose_education,
    },
    Rule {
        topic: Topic::Contact,
        triggers: &["contact", "reach", "email", "phone"],
        confidence: 0.98,
        suggestions: &[
            "What's the best way to contact you?",
            "Are you available for projects?",
            "Can we schedule a call?",
        ],
        compose: compose_contact,
    },
    Rule {
        topic: Topic::MachineLearning,
        triggers: &["machine learning", "ml", "ai"],
        confidence: 0.94,
        suggestions: &[
            "What ML algorithms do you use?",
            "Tell me about your data science process",
            "Have you worked with deep learning?",
        ],
        compose: compose_machine_learning,
    },
    Rule {
        topic: Topic::Hiring,
        // `work` is shadowed by the projects rule.
        triggers: &["hire", "job", "opportunity", "work"],
        confidence: 0.93,
        suggestions: &[
            "What type of roles interest you?",
            "Tell me about your availability",
            "Can you share your resume?",
        ],
        compose: compose_hiring,
    },
    Rule {
        topic: Topic::Greeting,
        triggers: &["hello", "hi", "hey"],
        confidence: 0.88,
        suggestions: &[
            "Tell me about his projects",
            "What are his technical skills?",
            "How can I contact him?",
        ],
        compose: compose_greeting,
    },
];

static FALLBACK: Rule = Rule {
    topic: Topic::General,
    triggers: &[],
    confidence: 0.75,
    suggestions: &[
        "Show me his projects",
        "What technologies does he use?",
        "Tell me about his education",
        "How can I contact him?",
    ],
    compose: compose_general,
};

/// Maps messages to replies over a shared, read-only knowledge base.
#[derive(Debug, Clone)]
pub struct Classifier {
    knowledge: Arc<KnowledgeBase>,
}

impl Classifier {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    /// A classifier over the built-in knowledge base.
    pub fn builtin() -> Self {
        Self::new(KnowledgeBase::shared())
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// The ordered rule list, excluding the fallback.
    pub fn rules() -> &'static [Rule] {
        &RULES
    }

    /// The rule that answers when nothing else matches.
    pub fn fallback() -> &'static Rule {
        &FALLBACK
    }

    /// Find the first rule matching `message`, or the fallback.
    pub fn route(message: &str) -> &'static Rule {
        let normalized = message.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.matches(&normalized))
            .unwrap_or(&FALLBACK)
    }

    /// Classify a message. `context` is accepted for interface
    /// compatibility and does not influence routing.
    pub fn classify(&self, message: &str, context: Option<&str>) -> ChatReply {
        let rule = Self::route(message);
        tracing::debug!(
            topic = %rule.topic,
            message_len = message.len(),
            has_context = context.is_some(),
            "Message classified"
        );
        rule.reply(&self.knowledge)
    }

    pub fn classify_request(&self, request: &ChatRequest) -> ChatReply {
        self.classify(&request.message, request.context.as_deref())
    }
}

// --- Templates ---

fn first_name(kb: &KnowledgeBase) -> &str {
    kb.personal
        .name
        .split_whitespace()
        .next()
        .unwrap_or(&kb.personal.name)
}

fn compose_projects(kb: &KnowledgeBase) -> String {
    let details = kb
        .projects
        .iter()
        .map(|p| format!("{}: {} ({})", p.name, p.description, p.tech.join(", ")))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "I've developed several innovative projects that showcase my expertise in machine learning and full-stack development:\n\n\
         {details}\n\n\
         Each project demonstrates my ability to solve real-world problems using cutting-edge technology. \
         Would you like me to elaborate on any specific project?"
    )
}

fn compose_skills(kb: &KnowledgeBase) -> String {
    let lines = ["programming", "development", "learning"]
        .iter()
        .filter_map(|key| kb.skill(key))
        .map(|cat| format!("🔹 {}: {}", cat.label, cat.items.join(", ")))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "My technical expertise spans multiple domains:\n\n\
         {lines}\n\n\
         I'm particularly passionate about machine learning and agricultural technology, combining AI with \
         real-world applications to solve complex problems. My projects demonstrate proficiency in both \
         frontend and backend development."
    )
}

fn compose_education(kb: &KnowledgeBase) -> String {
    let edu = &kb.personal.education;
    format!(
        "I'm currently pursuing my {} degree at {} in {}. This prestigious institution has provided me with \
         a strong foundation in engineering principles and computer science.\n\n\
         During my studies, I've focused on practical application of theoretical knowledge, which is evident \
         in my diverse project portfolio spanning machine learning, agricultural technology, and web development.",
        edu.degree, edu.institution, edu.location
    )
}

fn compose_contact(kb: &KnowledgeBase) -> String {
    let p = &kb.personal;
    format!(
        "You can reach me through multiple channels:\n\n\
         📧 Email: {}\n\
         📱 Phone: {}\n\
         💼 GitHub: {}\n\
         🔗 LinkedIn: {}\n\n\
         I'm always open to discussing new opportunities, collaborations, or answering any questions about \
         my work. Feel free to connect!",
        p.emails.join(" or "),
        p.phone,
        p.github,
        p.linkedin
    )
}

fn compose_machine_learning(_kb: &KnowledgeBase) -> String {
    "Machine Learning is one of my core competencies! I've applied ML techniques across multiple domains:\n\n\
     🎬 Movie Recommendation System - Implemented collaborative filtering and content-based algorithms\n\
     🌾 Agricultural Applications - Used predictive modeling for crop yields and moisture analysis\n\
     📊 Data Analytics - Leveraged statistical models for pattern recognition\n\n\
     I'm experienced with Python's ML ecosystem including scikit-learn, pandas, and numpy. My approach \
     combines theoretical understanding with practical implementation to solve real-world challenges."
        .to_string()
}

fn compose_hiring(_kb: &KnowledgeBase) -> String {
    "I'm actively seeking opportunities in software development, machine learning, and full-stack development! \
     Here's what I bring to the table:\n\n\
     ✅ Strong foundation in multiple programming languages\n\
     ✅ Proven track record with deployed projects\n\
     ✅ Passion for innovative problem-solving\n\
     ✅ Experience in both frontend and backend technologies\n\
     ✅ Growing expertise in machine learning applications\n\n\
     I'm particularly interested in roles that combine technology with real-world impact, similar to my \
     agricultural technology projects. Let's discuss how I can contribute to your team!"
        .to_string()
}

fn compose_greeting(kb: &KnowledgeBase) -> String {
    let highlights = kb
        .projects
        .iter()
        .take(2)
        .map(|p| p.name.trim_end_matches(" System"))
        .collect::<Vec<_>>()
        .join(", ");
    let first = first_name(kb);

    format!(
        "Hello! I'm an AI assistant representing {name}'s portfolio. {first} is a passionate {degree} student \
         from {school} with expertise in machine learning, full-stack development, and agricultural technology.\n\n\
         I can help you learn about:\n\
         🔹 His innovative projects ({highlights}, etc.)\n\
         🔹 Technical skills and programming expertise\n\
         🔹 Educational background and achievements\n\
         🔹 Contact information and availability\n\n\
         What would you like to know about {first}'s work?",
        name = kb.personal.name,
        degree = kb.personal.education.degree,
        school = kb.personal.education.short_name,
    )
}

fn compose_general(kb: &KnowledgeBase) -> String {
    let first = first_name(kb);
    format!(
        "I'd be happy to help you learn more about {name}! As a {degree} student at {school}, he's developed an \
         impressive portfolio of projects spanning machine learning, agricultural technology, and web development.\n\n\
         His work includes innovative solutions like movie recommendation systems, crop prediction models, and \
         agricultural safety platforms. He's proficient in multiple programming languages and is passionate about \
         using technology to solve real-world problems.\n\n\
         What specific aspect of {first}'s background or projects would you like to explore?",
        name = kb.personal.name,
        degree = kb.personal.education.degree,
        school = kb.personal.education.short_name,
    )
}
