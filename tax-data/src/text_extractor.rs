//! Rule-based extraction of Form 16 figures from plain text.

use std::time::Instant;

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use rust_decimal::Decimal;
use tax_core::{
    CapabilityError, DeductionLimits, Document, DocumentParseResult, DocumentParser,
    FinancialData, FinancialDataInput,
};
use tracing::{debug, warn};

/// Maximum length of the text excerpt returned with a result.
const EXCERPT_CHARS: usize = 500;

const AMOUNT: &str = r"\D*?(\d[\d,]*(?:\.\d+)?)";

/// Fields the extractor looks for, with the label that precedes each amount.
const FIELD_PATTERNS: [(Field, &str); 5] = [
    (Field::BasicSalary, r"salary as per .*?section 17\(1\)"),
    (Field::Hra, r"house rent allowance(?: under section 10\(13a\))?"),
    (Field::ProfessionalTax, r"tax on employment(?: under section 16\(iii\))?"),
    (Field::Section80c, r"section 80c\b"),
    (Field::TdsDeducted, r"tax deducted at source"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    BasicSalary,
    Hra,
    ProfessionalTax,
    Section80c,
    TdsDeducted,
}

impl Field {
    fn assign(
        self,
        input: &mut FinancialDataInput,
        value: Decimal,
    ) {
        match self {
            Field::BasicSalary => input.basic_salary = value,
            Field::Hra => input.hra = value,
            Field::ProfessionalTax => input.professional_tax = value,
            Field::Section80c => input.section_80c = value,
            Field::TdsDeducted => input.tds_deducted = value,
        }
    }
}

/// Offline [`DocumentParser`] for `text/plain` Form 16 exports.
///
/// Each field is matched with a case-insensitive label pattern followed by
/// the first amount after it. Confidence grows with the number of fields
/// found.
pub struct RuleBasedExtractor {
    patterns: Vec<(Field, Regex)>,
    noise_line: Regex,
    limits: DeductionLimits,
}

impl RuleBasedExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = FIELD_PATTERNS
            .iter()
            .map(|(field, label)| {
                RegexBuilder::new(&format!("{label}{AMOUNT}"))
                    .case_insensitive(true)
                    .build()
                    .map(|re| (*field, re))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let noise_line = Regex::new(r"^[\d\s\W]+$")?;

        Ok(Self {
            patterns,
            noise_line,
            limits: DeductionLimits::default(),
        })
    }

    /// Drops lines holding only digits and punctuation, then collapses
    /// whitespace into single spaces.
    fn preprocess(
        &self,
        text: &str,
    ) -> String {
        text.lines()
            .filter(|line| !self.noise_line.is_match(line))
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Amounts found in `text`, keyed by field, skipping fields with no match.
    fn extract(
        &self,
        text: &str,
    ) -> Vec<(Field, Decimal)> {
        self.patterns
            .iter()
            .filter_map(|(field, re)| {
                let captured = re.captures(text)?.get(1)?.as_str().replace(',', "");
                let value = captured.parse::<Decimal>().ok()?;
                Some((*field, value))
            })
            .collect()
    }

    fn confidence(
        found: usize,
        total: usize,
    ) -> f64 {
        if found == 0 || total == 0 {
            return 0.1;
        }
        (found as f64 / total as f64 * 0.8 + 0.15).clamp(0.1, 0.95)
    }

    fn suggestions(
        data: &FinancialData,
        limits: &DeductionLimits,
    ) -> Vec<String> {
        let mut suggestions = Vec::new();
        if data.section_80c() < limits.section_80c {
            suggestions.push(
                "You may have more room for tax-saving investments under Section 80C."
                    .to_string(),
            );
        }
        suggestions.push("Please double-check all extracted amounts for accuracy.".to_string());
        suggestions
    }

    fn failed(
        filename: &str,
        reason: &str,
        started: Instant,
    ) -> DocumentParseResult {
        DocumentParseResult {
            success: false,
            filename: filename.to_string(),
            extracted_data: FinancialData::default(),
            confidence_score: 0.0,
            extracted_text: None,
            processing_time: started.elapsed().as_secs_f64(),
            warnings: vec![format!("Error parsing document: {reason}")],
            suggestions: vec!["Please try uploading a clearer document.".to_string()],
        }
    }
}

fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[async_trait]
impl DocumentParser for RuleBasedExtractor {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    async fn extract_financial_data(
        &self,
        document: &Document,
    ) -> Result<DocumentParseResult, CapabilityError> {
        let started = Instant::now();

        if media_type(&document.content_type) != "text/plain" {
            return Err(CapabilityError::UnsupportedContentType(
                document.content_type.clone(),
            ));
        }

        let raw = std::str::from_utf8(&document.bytes).map_err(|e| {
            CapabilityError::Extraction(format!("{} is not valid UTF-8: {e}", document.filename))
        })?;

        let text = self.preprocess(raw);
        if text.is_empty() {
            warn!(filename = %document.filename, "document has no extractable text");
            return Ok(Self::failed(
                &document.filename,
                "document contains no text",
                started,
            ));
        }

        let found: Vec<_> = self
            .extract(&text)
            .into_iter()
            .filter(|(_, value)| *value > Decimal::ZERO)
            .collect();

        let mut input = FinancialDataInput::default();
        for (field, value) in &found {
            field.assign(&mut input, *value);
        }
        let data = FinancialData::from(input);

        let mut warnings = Vec::new();
        if found.is_empty() {
            warnings.push(
                "Could not extract any financial data. Document may be unreadable or empty."
                    .to_string(),
            );
        }

        debug!(
            filename = %document.filename,
            fields = found.len(),
            "extracted financial data"
        );

        Ok(DocumentParseResult {
            success: true,
            filename: document.filename.clone(),
            confidence_score: Self::confidence(found.len(), FIELD_PATTERNS.len()),
            extracted_text: Some(text.chars().take(EXCERPT_CHARS).collect()),
            processing_time: started.elapsed().as_secs_f64(),
            warnings,
            suggestions: Self::suggestions(&data, &self.limits),
            extracted_data: data,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const FORM16: &str = "\
PART B (Annexure)
Details of Salary Paid
1. Gross Salary
(a) Salary as per provisions contained in section 17(1) 8,40,000.00
Allowances exempt: House rent allowance under section 10(13A) 1,20,000
Tax on employment under section 16(iii) 2,500
Deduction in respect of life insurance premia under section 80C 1,50,000
Total tax deducted at source 45,200
-- 2 --
";

    fn document(
        content_type: &str,
        bytes: &[u8],
    ) -> Document {
        Document {
            filename: "form16.txt".to_string(),
            content_type: content_type.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    fn extractor() -> RuleBasedExtractor {
        RuleBasedExtractor::new().unwrap()
    }

    #[tokio::test]
    async fn extracts_every_form16_field() {
        let result = extractor()
            .extract_financial_data(&document("text/plain", FORM16.as_bytes()))
            .await
            .unwrap();

        let data = &result.extracted_data;
        assert!(result.success);
        assert_eq!(data.basic_salary(), dec!(840000));
        assert_eq!(data.hra(), dec!(120000));
        assert_eq!(data.professional_tax(), dec!(2500));
        assert_eq!(data.section_80c(), dec!(150000));
        assert_eq!(data.tds_deducted(), dec!(45200));
        assert_eq!(result.confidence_score, 0.95);
        assert!(result.warnings.is_empty());
        assert_eq!(
            result.suggestions,
            vec!["Please double-check all extracted amounts for accuracy."]
        );
    }

    #[tokio::test]
    async fn partial_extraction_scales_confidence() {
        let text = "Salary as per provisions contained in section 17(1) 500000\n\
                    Total tax deducted at source 12000";

        let result = extractor()
            .extract_financial_data(&document("text/plain", text.as_bytes()))
            .await
            .unwrap();

        assert_eq!(result.extracted_data.basic_salary(), dec!(500000));
        assert_eq!(result.extracted_data.tds_deducted(), dec!(12000));
        assert!((result.confidence_score - 0.47).abs() < 1e-9);
        assert_eq!(result.suggestions.len(), 2);
    }

    #[tokio::test]
    async fn nothing_found_warns_with_low_confidence() {
        let result = extractor()
            .extract_financial_data(&document("text/plain", b"Hello, this is a letter."))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.confidence_score, 0.1);
        assert_eq!(
            result.warnings,
            vec!["Could not extract any financial data. Document may be unreadable or empty."]
        );
        assert_eq!(result.extracted_data, FinancialData::default());
    }

    #[tokio::test]
    async fn noise_lines_are_dropped_from_excerpt() {
        let result = extractor()
            .extract_financial_data(&document("text/plain", FORM16.as_bytes()))
            .await
            .unwrap();

        let excerpt = result.extracted_text.unwrap();
        assert!(excerpt.starts_with("PART B (Annexure) Details of Salary Paid"));
        assert!(!excerpt.contains("-- 2 --"));
        assert!(!excerpt.contains('\n'));
    }

    #[tokio::test]
    async fn excerpt_is_capped() {
        let text = "word ".repeat(400);

        let result = extractor()
            .extract_financial_data(&document("text/plain", text.as_bytes()))
            .await
            .unwrap();

        assert_eq!(result.extracted_text.unwrap().chars().count(), EXCERPT_CHARS);
    }

    #[tokio::test]
    async fn content_type_parameters_are_ignored() {
        let result = extractor()
            .extract_financial_data(&document("Text/Plain; charset=utf-8", FORM16.as_bytes()))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejects_unsupported_content_type() {
        let err = extractor()
            .extract_financial_data(&document("application/pdf", b"%PDF-1.7"))
            .await
            .unwrap_err();

        assert!(matches!(err, CapabilityError::UnsupportedContentType(t) if t == "application/pdf"));
    }

    #[tokio::test]
    async fn rejects_invalid_utf8() {
        let err = extractor()
            .extract_financial_data(&document("text/plain", &[0xff, 0xfe, 0x00]))
            .await
            .unwrap_err();

        assert!(matches!(err, CapabilityError::Extraction(_)));
    }

    #[tokio::test]
    async fn blank_document_is_unsuccessful() {
        let result = extractor()
            .extract_financial_data(&document("text/plain", b"\n  \n12 34\n"))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(
            result.warnings,
            vec!["Error parsing document: document contains no text"]
        );
    }
}
