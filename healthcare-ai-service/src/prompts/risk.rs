use crate::models::PatientProfile;

const PERSONA: &str = "You are an expert Clinical Risk Analyst. Review the patient data and \
                       generate a detailed risk assessment report.";

const REPORT_SECTIONS: &str = "## Overall NCD Risk Assessment\n \
     (A single paragraph summarizing the primary risk category. \
     You MUST bold the specific risk level keyword, i.e., write it as **Low**, **Moderate**, **High**, or **Critical**.)\n\
     ## Key Risk Factors & Interpretation\n \
     (Bullet points detailing 3-5 specific data points that contribute most to the risk. \
     Interpret the data, e.g., 'Calculated BMI of 32.5 indicates Obesity.').\n\
     ## Personalized Action Plan\n \
     (3-5 concrete, actionable, and patient-friendly steps to mitigate the identified risks.)\n\
     ## Next Recommended Steps\n \
     (A concluding sentence on consulting a primary care physician.)\n";

/// Build the risk assessment prompt.
///
/// The model is asked for a JSON object with `risk_level` and
/// `report_markdown`; the handler unwraps `report_markdown` before replying.
pub fn build_risk_prompt(profile: &PatientProfile) -> String {
    let data_block: String = profile
        .fields()
        .iter()
        .map(|(label, value)| format!("- {}: {}\n", label, value))
        .collect();

    let output_requirements = format!(
        "--- OUTPUT REQUIREMENTS ---\n\
         You must return the result strictly as valid JSON with exactly two keys:\n\
         1. 'risk_level': A single string value. MUST be one of: 'Low', 'Moderate', 'High', 'Critical'.\n\
         2. 'report_markdown': A string containing the full report formatted using Markdown headings exactly as requested below:\n\
         {}\n\
         Do not include any text outside the JSON object.",
        REPORT_SECTIONS
    );

    format!("{}\n\n{}\n{}", PERSONA, data_block, output_requirements)
}
