//! Offline tax assistant backed by a small static knowledge base.

use std::time::Instant;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::{CapabilityError, ChatContext, ChatQuery, ChatResponse, TaxAssistant};
use tracing::debug;

const MAX_FOLLOW_UPS: usize = 3;
const HIGH_INCOME: Decimal = dec!(1000000);
const LOW_INCOME: Decimal = dec!(500000);

struct Topic {
    keyword: &'static str,
    response: &'static str,
    sources: &'static [&'static str],
    confidence: f64,
}

/// Checked in order; the first keyword contained in the query wins.
static TOPICS: [Topic; 6] = [
    Topic {
        keyword: "80c",
        response: "\
Section 80C provides tax deduction up to ₹1,50,000 per year for specified investments:

**Popular 80C Options:**
• **PPF (Public Provident Fund)**: 15-year lock-in, tax-free returns
• **ELSS Mutual Funds**: 3-year lock-in, market-linked returns
• **EPF**: Automatic deduction from salary
• **NSC**: 5-year fixed income investment
• **Life Insurance Premiums**: Up to 10% of sum assured
• **Home Loan Principal**: Repayment qualifies for 80C

**Note**: This deduction is only available in the old tax regime.",
        sources: &["Section 80C Guide", "Investment Planning"],
        confidence: 0.9,
    },
    Topic {
        keyword: "80d",
        response: "\
Section 80D provides deduction for health insurance premiums:

**Deduction Limits:**
• Self, spouse, children (below 60): Up to ₹25,000
• Self, spouse, children (senior citizen): Up to ₹50,000
• Parents (below 60): Additional ₹25,000
• Parents (senior citizen): Additional ₹50,000
• Preventive health check-ups: Additional ₹5,000

**Important**: Available only in old tax regime.",
        sources: &["Section 80D Guide", "Health Insurance"],
        confidence: 0.9,
    },
    Topic {
        keyword: "hra",
        response: "\
HRA exemption is calculated as the **minimum** of three amounts:

1. **Actual HRA received** from employer
2. **50% of basic salary** (metro cities) or **40%** (non-metro)
3. **Rent paid minus 10% of basic salary**

**Metro Cities**: Mumbai, Delhi, Kolkata, Chennai qualify for the 50% rate

**Required Documents:**
• Rent receipts
• Rental agreement
• Landlord's PAN (if annual rent > ₹1 lakh)",
        sources: &["HRA Calculation Guide", "Salary Exemptions"],
        confidence: 0.9,
    },
    Topic {
        keyword: "new regime",
        response: "\
**New Tax Regime:**

**Tax Slabs (AY 2024-25):**
• ₹0 - ₹3L: 0%
• ₹3L - ₹6L: 5%
• ₹6L - ₹9L: 10%
• ₹9L - ₹12L: 15%
• ₹12L - ₹15L: 20%
• Above ₹15L: 30%

**Limitations:**
• No deductions except standard deduction (₹50,000) and professional tax
• No Chapter VI-A investment, health insurance, HRA or home loan interest benefits

**Best For**: Individuals with minimal tax-saving investments.",
        sources: &["New Tax Regime Guide", "Tax Planning"],
        confidence: 0.9,
    },
    Topic {
        keyword: "old regime",
        response: "\
**Old Tax Regime:**

**Tax Slabs (AY 2024-25):**
• ₹0 - ₹2.5L: 0%
• ₹2.5L - ₹5L: 5%
• ₹5L - ₹10L: 20%
• Above ₹10L: 30%

**Major Deductions Available:**
• Section 80C: ₹1,50,000
• Section 80D: ₹25,000 (₹50,000 for seniors)
• HRA exemption
• Home loan interest: ₹2,00,000
• Standard deduction: ₹50,000

**Best For**: Individuals with substantial tax-saving investments and home loans.",
        sources: &["Old Tax Regime Guide", "Deduction Planning"],
        confidence: 0.9,
    },
    Topic {
        keyword: "document",
        response: "\
**Essential Documents for ITR Filing:**

**From Employer:**
• Form 16 (TDS certificate)
• Salary slips for entire financial year

**Investment Proofs:**
• PPF statements, ELSS certificates, life insurance premium receipts

**Bank Documents:**
• Interest certificates, bank statements, home loan interest certificate

**Other Income:**
• Capital gains statements and interest from other sources",
        sources: &["ITR Filing Guide", "Document Requirements"],
        confidence: 0.8,
    },
];

const GENERAL_RESPONSE: &str = "\
I'm your tax assistant for Indian income tax questions.

**I can help you with:**
• Tax regime comparison (old vs new)
• Deduction optimization (80C, 80D, HRA, etc.)
• Document requirements for tax filing

**Quick Questions You Can Ask:**
• \"How much can I save under Section 80C?\"
• \"What documents do I need for ITR filing?\"
• \"How is HRA exemption calculated?\"";

const GENERAL_SOURCES: [&str; 2] = ["General Tax Guide", "Tax Assistant"];
const GENERAL_CONFIDENCE: f64 = 0.7;

/// Keyword-driven follow-ups, checked in order; only the first match is used.
static FOLLOW_UPS: [(&str, [&str; 3]); 5] = [
    (
        "80c",
        [
            "What are the best 80C investment options for my income level?",
            "How does 80C work with the new tax regime?",
            "Can I claim 80C for home loan principal repayment?",
        ],
    ),
    (
        "regime",
        [
            "How do I calculate which regime saves more tax?",
            "Can I switch between tax regimes every year?",
            "What factors should I consider when choosing a regime?",
        ],
    ),
    (
        "hra",
        [
            "What if I don't have rent receipts for HRA claim?",
            "How does HRA work with home loan tax benefits?",
            "Can I claim HRA if I live in my own property?",
        ],
    ),
    (
        "document",
        [
            "What happens if I file ITR after the deadline?",
            "How do I file ITR if I changed jobs during the year?",
            "What is the difference between ITR-1 and ITR-2?",
        ],
    ),
    (
        "investment",
        [
            "What are the tax implications of ELSS investments?",
            "Should I invest in PPF or NPS for tax saving?",
            "How much should I invest in tax-saving instruments?",
        ],
    ),
];

static DEFAULT_FOLLOW_UPS: [&str; 3] = [
    "How can I optimize my tax savings this year?",
    "What is the ITR filing deadline for this year?",
    "Should I consult a tax advisor for my situation?",
];

/// Answers tax questions without any external service.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineAssistant;

impl OfflineAssistant {
    pub fn new() -> Self {
        Self
    }

    fn lookup(message: &str) -> (&'static str, Vec<String>, f64) {
        match TOPICS.iter().find(|t| message.contains(t.keyword)) {
            Some(topic) => (
                topic.response,
                topic.sources.iter().map(|s| s.to_string()).collect(),
                topic.confidence,
            ),
            None => (
                GENERAL_RESPONSE,
                GENERAL_SOURCES.iter().map(|s| s.to_string()).collect(),
                GENERAL_CONFIDENCE,
            ),
        }
    }

    /// An income-based question (when the context carries an income) leads,
    /// followed by the keyword questions, capped at three.
    fn follow_ups(
        message: &str,
        response: &str,
        context: Option<&ChatContext>,
    ) -> Vec<String> {
        let mut questions = Vec::new();

        if let Some(income) = context.and_then(|c| c.total_income) {
            if income > HIGH_INCOME {
                questions.push(
                    "What additional tax planning strategies work for high-income individuals?"
                        .to_string(),
                );
            } else if income < LOW_INCOME {
                questions.push(
                    "Are there any special tax benefits for lower income groups?".to_string(),
                );
            }
        }

        let response = response.to_lowercase();
        let keyword_questions = FOLLOW_UPS
            .iter()
            .find(|(keyword, _)| message.contains(keyword) || response.contains(keyword))
            .map(|(_, qs)| qs.as_slice())
            .unwrap_or(&DEFAULT_FOLLOW_UPS);
        questions.extend(keyword_questions.iter().map(|q| q.to_string()));

        questions.truncate(MAX_FOLLOW_UPS);
        questions
    }
}

#[async_trait]
impl TaxAssistant for OfflineAssistant {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn answer_query(
        &self,
        query: &ChatQuery,
    ) -> Result<ChatResponse, CapabilityError> {
        let started = Instant::now();
        let message = query.message.trim().to_lowercase();
        if message.is_empty() {
            return Err(CapabilityError::InvalidQuery("message is empty".to_string()));
        }

        let (response, sources, confidence) = Self::lookup(&message);
        let follow_up_questions = Self::follow_ups(&message, response, query.context.as_ref());

        debug!(
            user_id = query.user_id.as_deref().unwrap_or("-"),
            confidence,
            "answered tax query"
        );

        Ok(ChatResponse {
            response: response.to_string(),
            confidence,
            sources,
            follow_up_questions,
            response_time: started.elapsed().as_secs_f64(),
        })
    }
}
