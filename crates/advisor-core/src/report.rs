//! Report derivation: one structured section sequence, two text formats.
//!
//! The sections are built exactly once from an [`AnalysisResult`] plus its
//! derived [`ScoreSummary`]; the chat and email formatters only map that
//! sequence to markup. Content parity between the two renderings therefore
//! holds by construction — a formatter cannot add or drop a section.
//!
//! Both formatters are pure: the same section sequence always yields
//! byte-identical output.

use crate::rubric::criterion_label;
use crate::score::ScoreSummary;
use crate::types::AnalysisResult;

/// Shown when the total reaches the 50% threshold.
pub const RECOMMEND_PROCEED: &str =
    "ผลการประเมินเบื้องต้นอยู่ในเกณฑ์ดี แนะนำให้ดำเนินการโครงงานนี้ต่อได้";

/// Shown when the total falls below the 50% threshold.
pub const RECOMMEND_REVISE: &str =
    "ผลการประเมินเบื้องต้นยังต่ำกว่าเกณฑ์ที่แนะนำ ควรพิจารณาปรับปรุงประเด็นต่างๆ อย่างละเอียด";

const CHAT_TITLE: &str = "สรุปผลการประเมินโครงงาน";
const EMAIL_SALUTATION: &str =
    "เรียน นักศึกษา,\n\nนี่คือผลการวิเคราะห์ข้อเสนอโครงงานของคุณจากผู้ช่วยสอน AI ครับ/ค่ะ\n\n";
const EMAIL_SIGNATURE: &str =
    "ขอให้นำข้อเสนอแนะเหล่านี้ไปปรับปรุงโครงงานต่อไป\n\nด้วยความปรารถนาดี,\nผู้ช่วยสอน AI";

/// One report section: a header plus a typed body.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Emoji marker, used by the chat rendering only.
    pub icon: &'static str,
    pub title: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    /// Labeled key/value lines (advisor summary, recommendation).
    Fields(Vec<(&'static str, String)>),
    /// Bullet list (strengths, red flags, ...).
    Items(Vec<String>),
    /// The five-criterion score table.
    ScoreTable(Vec<ScoreRow>),
    /// Free-flowing paragraph (overall summary).
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub label: String,
    pub score: u8,
    pub reason: String,
}

fn items_section(
    icon: &'static str,
    title: &'static str,
    items: &[crate::types::FlexText],
) -> Option<Section> {
    if items.is_empty() {
        return None;
    }
    Some(Section {
        icon,
        title,
        body: SectionBody::Items(items.iter().map(|i| i.0.clone()).collect()),
    })
}

/// Build the ordered section sequence for one analysis result.
///
/// Fixed order: advisor summary, recommendation, red flags (only when
/// present), strengths, areas for improvement, next steps, probing
/// questions, score table, overall summary. List sections with no items
/// are omitted entirely — no empty headers.
pub fn build_sections(result: &AnalysisResult, summary: &ScoreSummary) -> Vec<Section> {
    let mut sections = Vec::with_capacity(9);

    sections.push(Section {
        icon: "📝",
        title: "บทสรุปสำหรับอาจารย์ที่ปรึกษา",
        body: SectionBody::Fields(vec![
            ("สถานะ", result.advisor_summary.status.as_str().to_string()),
            ("ความเสี่ยงหลัก", result.advisor_summary.key_risk.clone()),
            (
                "ประเด็นที่ต้องหารือ",
                result.advisor_summary.discussion_point.clone(),
            ),
        ]),
    });

    let recommendation = if summary.recommended {
        RECOMMEND_PROCEED
    } else {
        RECOMMEND_REVISE
    };
    sections.push(Section {
        icon: "⭐",
        title: "ข้อเสนอแนะในการดำเนินการต่อ",
        body: SectionBody::Fields(vec![
            (
                "คะแนนรวม",
                format!("{} / {} ({}%)", summary.total, summary.max, summary.percentage),
            ),
            ("คำแนะนำ", recommendation.to_string()),
        ]),
    });

    sections.extend(items_section("🚩", "สัญญาณเตือน (Red Flags)", &result.red_flags));
    sections.extend(items_section("👍", "จุดเด่น (Strengths)", &result.strengths));
    sections.extend(items_section(
        "💡",
        "ประเด็นที่ควรปรับปรุง",
        &result.areas_for_improvement,
    ));
    sections.extend(items_section(
        "🚀",
        "ขั้นตอนถัดไปเชิงปฏิบัติ",
        &result.actionable_next_steps,
    ));
    sections.extend(items_section(
        "❓",
        "คำถามเพื่อการคิดต่อ",
        &result.probing_questions,
    ));

    let rows = result
        .scores
        .entries()
        .iter()
        .map(|(key, feedback)| ScoreRow {
            label: criterion_label(key).to_string(),
            score: feedback.score,
            reason: feedback.reason.clone(),
        })
        .collect();
    sections.push(Section {
        icon: "📋",
        title: "ตารางคะแนน",
        body: SectionBody::ScoreTable(rows),
    });

    sections.push(Section {
        icon: "📖",
        title: "สรุปภาพรวม",
        body: SectionBody::Text(result.summary.0.clone()),
    });

    sections
}

/// Chat rendering: inline emphasis markers and emoji section headers,
/// intended for pasting into a chat message.
pub fn render_chat(sections: &[Section]) -> String {
    let mut out = format!("*📊 {CHAT_TITLE} 📊*\n\n");

    for section in sections {
        out.push_str(&format!("*{} {}*\n", section.icon, section.title));
        match &section.body {
            SectionBody::Fields(fields) => {
                for (key, value) in fields {
                    out.push_str(&format!("*{key}:* {value}\n"));
                }
            }
            SectionBody::Items(items) => {
                for item in items {
                    out.push_str(&format!("- {item}\n"));
                }
            }
            SectionBody::ScoreTable(rows) => {
                for row in rows {
                    out.push_str(&format!("*{}:* {}/10\n", row.label, row.score));
                    out.push_str(&format!("_{}_\n\n", row.reason));
                }
                // ScoreTable rows already end with a blank line.
                continue;
            }
            SectionBody::Text(text) => {
                out.push_str(text);
                out.push('\n');
            }
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}

/// Plain-email rendering: ASCII section banners with a salutation and
/// signature block, intended as an email body.
pub fn render_email(sections: &[Section]) -> String {
    let mut out = String::from(EMAIL_SALUTATION);

    for section in sections {
        out.push_str(&format!("--- {} ---\n", section.title));
        match &section.body {
            SectionBody::Fields(fields) => {
                for (key, value) in fields {
                    out.push_str(&format!("{key}: {value}\n"));
                }
            }
            SectionBody::Items(items) => {
                for item in items {
                    out.push_str(&format!("- {item}\n"));
                }
            }
            SectionBody::ScoreTable(rows) => {
                for row in rows {
                    out.push_str(&format!("เกณฑ์: {}\n", row.label));
                    out.push_str(&format!("คะแนน: {}/10\n", row.score));
                    out.push_str(&format!("เหตุผล: {}\n\n", row.reason));
                }
                continue;
            }
            SectionBody::Text(text) => {
                out.push_str(text);
                out.push('\n');
            }
        }
        out.push('\n');
    }

    out.push_str(EMAIL_SIGNATURE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::summarize;
    use crate::types::{
        AdvisorSummary, AnalysisResult, CriterionFeedback, FlexText, ProposalStatus, ScoreSet,
    };

    fn mk_result(scores: [u8; 5], red_flags: Vec<&str>) -> AnalysisResult {
        let fb = |score| CriterionFeedback {
            score,
            reason: format!("เหตุผลสำหรับคะแนน {score}"),
        };
        AnalysisResult {
            advisor_summary: AdvisorSummary {
                status: ProposalStatus::GoWithMajorRevisions,
                key_risk: "การเข้าถึงข้อมูลการผลิตอาจไม่ได้รับอนุมัติ".to_string(),
                discussion_point: "ขอบเขตข้อมูลที่ใช้วิเคราะห์".to_string(),
            },
            strengths: vec![FlexText::from("หัวข้อเชื่อมโยงกับงานที่ได้รับมอบหมาย")],
            areas_for_improvement: vec![FlexText::from("ยังไม่ระบุตัวชี้วัดเชิงปริมาณ")],
            scores: ScoreSet {
                problem_clarity_in_context: fb(scores[0]),
                measurable_objectives: fb(scores[1]),
                scope_and_timeline_feasibility: fb(scores[2]),
                methodology_in_practice: fb(scores[3]),
                synergy_and_value_for_company: fb(scores[4]),
            },
            summary: FlexText::from("ข้อเสนอมีศักยภาพแต่ต้องเพิ่มรายละเอียด"),
            red_flags: red_flags.into_iter().map(FlexText::from).collect(),
            actionable_next_steps: vec![FlexText::from("นัดคุยกับพี่เลี้ยงเพื่อยืนยันขอบเขตข้อมูล")],
            probing_questions: vec![FlexText::from("ถ้าไม่ได้ข้อมูลตามแผน มีแผนสำรองอย่างไร?")],
        }
    }

    fn render_both(result: &AnalysisResult) -> (Vec<Section>, String, String) {
        let summary = summarize(&result.scores);
        let sections = build_sections(result, &summary);
        let chat = render_chat(&sections);
        let email = render_email(&sections);
        (sections, chat, email)
    }

    #[test]
    fn test_renderings_contain_same_sections_in_same_order() {
        let result = mk_result([6, 7, 5, 6, 8], vec!["ข้อมูลเป็นความลับของบริษัท"]);
        let (sections, chat, email) = render_both(&result);

        let mut chat_pos = 0;
        let mut email_pos = 0;
        for section in &sections {
            let c = chat[chat_pos..]
                .find(section.title)
                .unwrap_or_else(|| panic!("chat missing section {}", section.title));
            let e = email[email_pos..]
                .find(section.title)
                .unwrap_or_else(|| panic!("email missing section {}", section.title));
            chat_pos += c + section.title.len();
            email_pos += e + section.title.len();
        }
    }

    #[test]
    fn test_empty_red_flags_omit_section_in_both_renderings() {
        let result = mk_result([6, 7, 5, 6, 8], vec![]);
        let (sections, chat, email) = render_both(&result);

        assert!(sections.iter().all(|s| s.title != "สัญญาณเตือน (Red Flags)"));
        assert!(!chat.contains("สัญญาณเตือน"));
        assert!(!email.contains("สัญญาณเตือน"));
    }

    #[test]
    fn test_empty_list_sections_leave_no_empty_headers() {
        let mut result = mk_result([6, 7, 5, 6, 8], vec![]);
        result.strengths.clear();
        result.probing_questions.clear();
        let (_, chat, email) = render_both(&result);

        assert!(!chat.contains("จุดเด่น"));
        assert!(!email.contains("จุดเด่น"));
        assert!(!chat.contains("คำถามเพื่อการคิดต่อ"));
        assert!(!email.contains("คำถามเพื่อการคิดต่อ"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let result = mk_result([3, 9, 4, 8, 2], vec!["หัวข้อไม่เกี่ยวข้องกับแผนก"]);
        let summary = summarize(&result.scores);
        let sections = build_sections(&result, &summary);
        assert_eq!(render_chat(&sections), render_chat(&sections));
        assert_eq!(render_email(&sections), render_email(&sections));

        // Rebuilding from the same result is also byte-identical.
        let rebuilt = build_sections(&result, &summarize(&result.scores));
        assert_eq!(render_chat(&rebuilt), render_chat(&sections));
    }

    #[test]
    fn test_perfect_result_selects_positive_recommendation() {
        let result = mk_result([10, 10, 10, 10, 10], vec![]);
        let (_, chat, email) = render_both(&result);

        assert!(chat.contains("50 / 50 (100%)"));
        assert!(chat.contains(RECOMMEND_PROCEED));
        assert!(email.contains("50 / 50 (100%)"));
        assert!(email.contains(RECOMMEND_PROCEED));
    }

    #[test]
    fn test_floor_result_selects_revise_recommendation() {
        let result = mk_result([1, 1, 1, 1, 1], vec![]);
        let (_, chat, email) = render_both(&result);

        assert!(chat.contains("5 / 50 (10%)"));
        assert!(chat.contains(RECOMMEND_REVISE));
        assert!(email.contains(RECOMMEND_REVISE));
    }

    #[test]
    fn test_score_table_lists_all_five_criteria() {
        let result = mk_result([6, 7, 5, 6, 8], vec![]);
        let (_, chat, email) = render_both(&result);

        for key in [
            "problemClarityInContext",
            "measurableObjectives",
            "scopeAndTimelineFeasibility",
            "methodologyInPractice",
            "synergyAndValueForCompany",
        ] {
            let label = criterion_label(key);
            assert!(chat.contains(label), "chat missing criterion {key}");
            assert!(email.contains(label), "email missing criterion {key}");
        }
        assert!(email.contains("คะแนน: 7/10"));
    }

    #[test]
    fn test_email_carries_salutation_and_signature() {
        let result = mk_result([6, 7, 5, 6, 8], vec![]);
        let (_, _, email) = render_both(&result);
        assert!(email.starts_with("เรียน นักศึกษา,"));
        assert!(email.ends_with("ด้วยความปรารถนาดี,\nผู้ช่วยสอน AI"));
    }

    #[test]
    fn test_malformed_item_renders_as_placeholder() {
        let mut result = mk_result([6, 7, 5, 6, 8], vec![]);
        result.strengths = vec![serde_json::from_str(r#"{"reason": "ดี", "score": 8}"#).unwrap()];
        let (_, chat, _) = render_both(&result);
        assert!(chat.contains("(ข้อมูลผิดรูปแบบ: ดี - 8 คะแนน)"));
    }
}
