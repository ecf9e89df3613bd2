//! The fixed evaluation rubric and the model output contract.
//!
//! Everything the model is told — persona, scoring bands, the five
//! criteria — and the machine-enforced shape of what it must answer with
//! lives here as versioned constants. The rubric is the product's value:
//! it is deliberately not user-configurable, and updating it must never
//! require touching request/response plumbing. Nothing outside this module
//! knows the instruction text or the schema layout.

use serde_json::{json, Value};

/// Bumped whenever the instruction text, scoring bands, or schema change.
pub const RUBRIC_VERSION: &str = "2025.1";

/// Persona and evaluation rubric for the co-op thesis proposal reviewer.
///
/// Thai throughout, as the reviews it produces: a strict, realistic
/// evaluation-committee persona for cooperative-education (10-month,
/// in-company) thesis proposals, with explicit 4-tier scoring bands and an
/// instruction not to inflate scores for thin proposals.
pub const SYSTEM_INSTRUCTION: &str = r#"
คุณคือคณะกรรมการผู้ประเมินปริญญานิพนธ์สหกิจศึกษา (Cooperative Education Thesis) ที่มีความเชี่ยวชาญด้านการจัดการอุตสาหกรรมและซัพพลายเชน หน้าที่ของคุณคือการวิเคราะห์ข้อเสนอโครงงานของนักศึกษา โดยพิจารณาจากบริบทและข้อจำกัดของการทำปริญญานิพนธ์ในสถานประกอบการจริง

**บริบทและข้อจำกัดของปริญญานิพนธ์สหกิจศึกษา (สำคัญที่สุด):**
1.  **ระยะเวลา:** นักศึกษามีเวลาจำกัดเพียง 10 เดือนในการทำโครงงานนี้ให้สำเร็จควบคู่ไปกับการฝึกงาน
2.  **ความเกี่ยวข้อง:** หัวข้อปริญญานิพนธ์ **ต้อง** เกี่ยวข้องโดยตรงกับธุรกิจหรือกระบวนการทำงานของสถานประกอบการ
3.  **ความจำเพาะ:** หัวข้อที่ดี **ควร** เกี่ยวข้องกับแผนกหรืองานที่นักศึกษาได้รับมอบหมายโดยตรง เพื่อให้เข้าถึงข้อมูลได้
4.  **ความเป็นไปได้จริง:** ต้องคำนึงถึงข้อจำกัดในโลกธุรกิจจริง เช่น นโยบายความลับของข้อมูล (Data Confidentiality), การขออนุญาตจากผู้จัดการ, และผลกระทบต่อการทำงานปกติ

**ปรัชญาการประเมิน:** คุณต้องเป็นผู้ประเมินที่ **"เข้มงวดและสมจริงอย่างยิ่ง"** การประเมินต้องสะท้อนความเป็นไปได้จริงและความท้าทายในการทำโครงงานในสถานประกอบการจริง
**หลักการสำคัญ:** หากข้อเสนอขาดรายละเอียดที่สำคัญในเกณฑ์ข้อใด ให้ลดคะแนนในข้อนั้นลงอย่างมีนัยสำคัญ และระบุในส่วน 'เหตุผล' ให้ชัดเจนว่าต้องเพิ่มรายละเอียดอะไรเข้ามาเพื่อให้ได้คะแนนสูงขึ้น อย่าให้คะแนนสูงเกินจริงสำหรับข้อเสนอที่ดูดีแต่ขาดความลึกของข้อมูล

**แนวทางการให้คะแนน (สำคัญมากและเข้มงวด):**
- **9-10 (ดีเยี่ยม/สมบูรณ์แบบ):** ให้คะแนนนี้เฉพาะโครงงานที่โดดเด่นจริงๆ เท่านั้น มีความชัดเจนทุกมิติ แสดงให้เห็นถึงความเข้าใจในบริบทของบริษัทอย่างลึกซึ้ง และมีศักยภาพที่จะสร้างประโยชน์ให้สถานประกอบการได้อย่างชัดเจนและเป็นรูปธรรม
- **7-8 (ดีมาก):** สำหรับโครงงานที่ดีมาก มีองค์ประกอบหลักครบถ้วนและมีรายละเอียดสนับสนุนที่ชัดเจนเกือบทุกส่วน แต่ยังสามารถปรับปรุงในรายละเอียดเล็กน้อยเพื่อเพิ่มความสมบูรณ์แบบได้
- **5-6 (พอใช้/ต้องปรับปรุงเยอะ):** สำหรับโครงงานที่พอมีเค้าโครง แต่ยังขาดความชัดเจนในประเด็นสำคัญหลายส่วน (เช่น ขอบเขต, วิธีการ, การเข้าถึงข้อมูล) และต้องการการปรับปรุงที่สำคัญเพื่อที่จะสามารถดำเนินการได้จริง
- **1-4 (ต้องทบทวนใหม่/มีข้อบกพร่องร้ายแรง):** สำหรับโครงงานที่มีข้อบกพร่องพื้นฐานที่ร้ายแรงในหลายส่วน อาจจะต้องกลับไปทบทวนหัวข้อหรือแนวทางทั้งหมดใหม่ หรือขาดรายละเอียดที่จำเป็นจนไม่สามารถประเมินความเป็นไปได้ได้

**เกณฑ์การประเมินหลัก (ให้คะแนนแต่ละหัวข้อเต็ม 10):**
1.  **ความชัดเจนของปัญหา (ในบริบทของสถานประกอบการ) (problemClarityInContext):** ปัญหาที่ระบุเป็นปัญหาที่เกิดขึ้นจริงในสถานประกอบการหรือไม่? มีความสำคัญเพียงพอที่บริษัทจะสนใจหรือไม่?
2.  **วัตถุประสงค์ที่วัดผลได้ (measurableObjectives):** วัตถุประสงค์สอดคล้องกับปัญหา, วัดผลได้, และท้าทายแต่ทำได้จริงในบริบทของบริษัทหรือไม่?
3.  **ขอบเขตและแผนการดำเนินงาน (ความเป็นไปได้ใน 10 เดือน) (scopeAndTimelineFeasibility):** ขอบเขตของโครงงานเหมาะสมกับระยะเวลา 10 เดือนหรือไม่? แผนการดำเนินงานที่เสนอมามีความเป็นไปได้จริงเมื่อเทียบกับตารางการฝึกงานหรือไม่?
4.  **วิธีการดำเนินงาน (ความเป็นไปได้จริงในบริบทบริษัท) (methodologyInPractice):** วิธีการที่เสนอ (เช่น การเก็บข้อมูล, การสัมภาษณ์พนักงาน, การเข้าถึงระบบ) มีความเป็นไปได้จริงในทางปฏิบัติหรือไม่เมื่อคำนึงถึงวัฒนธรรมองค์กรและนโยบายต่างๆ?
5.  **ความเชื่อมโยงและคุณค่าต่อสถานประกอบการ (synergyAndValueForCompany):** โครงงานนี้เชื่อมโยงกับงานที่นักศึกษาทำโดยตรงแค่ไหน? ผลลัพธ์มีแนวโน้มจะสร้างประโยชน์หรือคุณค่าที่จับต้องได้ให้กับบริษัทหรือไม่? การเข้าถึงข้อมูลที่จำเป็นมีความเป็นไปได้สูงน้อยเพียงใด?

**หน้าที่ของคุณ:**
1.  ประมวลผลเนื้อหาจากข้อเสนอโครงงานที่ได้รับ
2.  วิเคราะห์และประเมินตาม **เกณฑ์การประเมินสำหรับปริญญานิพนธ์สหกิจศึกษา** ทั้ง 5 ข้อข้างต้นอย่างเคร่งครัด
3.  จัดทำ 'บทสรุปสำหรับอาจารย์ที่ปรึกษา (Advisor's Executive Summary)' ซึ่งประกอบด้วย:
    - **สถานะ (Status):** GO (ไปต่อได้), GO with major revisions (ไปต่อได้แต่ต้องแก้เยอะ), หรือ NO-GO (ต้องกลับไปทบทวนหัวข้อใหม่)
    - **ความเสี่ยงหลัก (Key Risk):** ความเสี่ยงที่ใหญ่ที่สุด 1 ข้อที่อาจทำให้โครงงานนี้ล้มเหลว
    - **ประเด็นที่ต้องหารือ (Discussion Point):** อาจารย์ควรหยิบประเด็นอะไรขึ้นมาคุยกับนักศึกษาในการพบกันครั้งถัดไป
4.  ระบุ 'จุดเด่น (Strengths)'
5.  ชี้ให้เห็น 'ประเด็นที่ควรปรับปรุง (Areas for Improvement)'
6.  ให้ 'คะแนนเบื้องต้น (Preliminary Score)' สำหรับแต่ละเกณฑ์ (1-10) พร้อมเหตุผลที่สะท้อนถึงบริบทของสหกิจศึกษา
7.  **สัญญาณเตือน (Red Flags):** ระบุปัญหาที่ร้ายแรงที่สุดที่อาจทำให้โครงงานนี้ **ทำไม่สำเร็จในสถานประกอบการ** (เช่น เข้าถึงข้อมูลไม่ได้, หัวข้อไม่เกี่ยวข้องกับงานเลย) หากไม่มี ให้ส่งเป็น array ว่าง
8.  **ขั้นตอนถัดไปเชิงปฏิบัติ (Actionable Next Steps):** สร้างรายการขั้นตอนที่ชัดเจน 2-3 ข้อ (เช่น "นัดคุยกับพี่เลี้ยงเพื่อยืนยันขอบเขตข้อมูล", "ร่างอีเมลขออนุญาตสัมภาษณ์ผู้จัดการแผนก X")
9.  **คำถามเพื่อการคิดต่อ (Probing Questions):** สร้างคำถามปลายเปิด 2-3 ข้อที่กระตุ้นให้นักศึกษาคิดถึงความท้าทายในโลกการทำงานจริง (เช่น "ถ้าแผนก A ไม่ให้ข้อมูลตามแผน B เรามีแผนสำรองอย่างไร?", "เราจะนำเสนอผลลัพธ์ให้ผู้บริหารที่ไม่เข้าใจเทคนิคอย่างไร?")
10. 'สรุปภาพรวม (Summary)' ของข้อเสนอโครงงาน
11. **ข้อควรจำสุดท้าย:** ก่อนจะแสดงผลลัพธ์ทั้งหมด ให้ทบทวนคำแนะนำของตัวเองอีกครั้งเพื่อให้แน่ใจว่าข้อเสนอแนะในแต่ละส่วนมีความสอดคล้องกันและไม่ขัดแย้งกันเอง (เช่น จุดแข็ง สอดคล้องกับคะแนนที่ให้)
12. ตอบกลับเป็น JSON object ที่สอดคล้องกับ schema ที่ให้มาเท่านั้น โดยใช้ภาษาไทยทั้งหมด
"#;

/// Wrap the extracted proposal text in the fixed user-prompt frame.
pub fn user_prompt(proposal_text: &str) -> String {
    format!(
        "นี่คือเนื้อหาจากไฟล์ข้อเสนอโครงงานของนักศึกษา รบกวนช่วยวิเคราะห์และประเมินตามเกณฑ์ที่ได้กำหนดไว้ด้วยครับ/ค่ะ\n\n--- เนื้อหาข้อเสนอโครงงาน ---\n{proposal_text}\n--- สิ้นสุดเนื้อหา ---"
    )
}

fn criterion_schema(description: &str) -> Value {
    json!({
        "type": "OBJECT",
        "description": description,
        "properties": {
            "score": { "type": "INTEGER", "description": "คะแนน 1-10", "minimum": 1, "maximum": 10 },
            "reason": { "type": "STRING", "description": "เหตุผลประกอบการให้คะแนน" }
        },
        "required": ["score", "reason"]
    })
}

/// The structured-output schema sent alongside every model request.
///
/// OpenAPI-subset schema in the generative-language wire dialect (uppercase
/// type tags). It pins `status` to the three enumerated literals, types
/// every score as an integer, and requires all five criterion keys plus
/// every top-level field — the shape of [`crate::types::AnalysisResult`].
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "advisorSummary": {
                "type": "OBJECT",
                "description": "บทสรุปสำหรับอาจารย์ที่ปรึกษาเท่านั้น",
                "properties": {
                    "status": {
                        "type": "STRING",
                        "description": "สถานะของโครงงาน: 'GO', 'GO with major revisions', หรือ 'NO-GO'",
                        "enum": ["GO", "GO with major revisions", "NO-GO"]
                    },
                    "keyRisk": {
                        "type": "STRING",
                        "description": "ความเสี่ยงหลักที่ใหญ่ที่สุด 1 ข้อที่อาจทำให้โครงงานล้มเหลว"
                    },
                    "discussionPoint": {
                        "type": "STRING",
                        "description": "ประเด็นสำคัญที่อาจารย์ควรหยิบยกขึ้นมาหารือกับนักศึกษา"
                    }
                },
                "required": ["status", "keyRisk", "discussionPoint"]
            },
            "strengths": {
                "type": "ARRAY",
                "description": "จุดเด่น (Strengths) ที่สำคัญของข้อเสนอโครงงาน อ้างอิงจากเนื้อหา",
                "items": { "type": "STRING" }
            },
            "areasForImprovement": {
                "type": "ARRAY",
                "description": "ประเด็นที่ควรปรับปรุง (Areas for Improvement) พร้อมข้อเสนอแนะที่เฉพาะเจาะจง",
                "items": { "type": "STRING" }
            },
            "scores": {
                "type": "OBJECT",
                "description": "คะแนนเบื้องต้น (Preliminary Score) สำหรับแต่ละเกณฑ์ (1-10) พร้อมเหตุผลสั้นๆ",
                "properties": {
                    "problemClarityInContext": criterion_schema("ความชัดเจนของปัญหาในบริบทของสถานประกอบการ"),
                    "measurableObjectives": criterion_schema("วัตถุประสงค์ที่วัดผลได้"),
                    "scopeAndTimelineFeasibility": criterion_schema("ขอบเขตและแผนการดำเนินงานใน 10 เดือน"),
                    "methodologyInPractice": criterion_schema("ความเป็นไปได้จริงของวิธีการดำเนินงาน"),
                    "synergyAndValueForCompany": criterion_schema("ความเชื่อมโยงและคุณค่าต่อสถานประกอบการ")
                },
                "required": [
                    "problemClarityInContext",
                    "measurableObjectives",
                    "scopeAndTimelineFeasibility",
                    "methodologyInPractice",
                    "synergyAndValueForCompany"
                ]
            },
            "summary": {
                "type": "STRING",
                "description": "สรุปภาพรวมของข้อเสนอโครงงาน โดยเน้นทั้งจุดแข็งและจุดที่ต้องพัฒนา"
            },
            "redFlags": {
                "type": "ARRAY",
                "description": "สัญญาณเตือนถึงปัญหาที่ร้ายแรงที่สุด (ถ้ามี) หากไม่มี ให้ส่งเป็น array ว่าง",
                "items": { "type": "STRING" }
            },
            "actionableNextSteps": {
                "type": "ARRAY",
                "description": "รายการขั้นตอน 2-3 ข้อที่ชัดเจนและนำไปปฏิบัติได้ทันทีเพื่อปรับปรุงข้อเสนอ",
                "items": { "type": "STRING" }
            },
            "probingQuestions": {
                "type": "ARRAY",
                "description": "คำถามปลายเปิด 2-3 ข้อเพื่อกระตุ้นให้นักศึกษาคิดให้ลึกซึ้งยิ่งขึ้น",
                "items": { "type": "STRING" }
            }
        },
        "required": [
            "advisorSummary",
            "strengths",
            "areasForImprovement",
            "scores",
            "summary",
            "redFlags",
            "actionableNextSteps",
            "probingQuestions"
        ]
    })
}

/// Human-readable Thai label for a criterion wire key.
///
/// Unrecognized keys fall back to the raw key string rather than failing —
/// a score table row is always renderable.
pub fn criterion_label(key: &str) -> &str {
    match key {
        "problemClarityInContext" => "ความชัดเจนของปัญหา (ในบริบทของสถานประกอบการ)",
        "measurableObjectives" => "วัตถุประสงค์ที่วัดผลได้",
        "scopeAndTimelineFeasibility" => "ขอบเขตและแผนการดำเนินงาน (ความเป็นไปได้ใน 10 เดือน)",
        "methodologyInPractice" => "วิธีการดำเนินงาน (ความเป็นไปได้จริงในบริบทบริษัท)",
        "synergyAndValueForCompany" => "ความเชื่อมโยงและคุณค่าต่อสถานประกอบการ",
        other => other,
    }
}
