//! The strict output-schema constraint passed to the remote model with every
//! batch analysis request. Uses Gemini's OpenAPI-subset schema types.

use serde_json::{json, Value};

/// Response schema for the batch analysis call. Every field is mandatory;
/// the gateway re-validates the payload on receipt anyway.
pub fn batch_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "jdSkills": {
                "type": "OBJECT",
                "description": "Key hard and soft skills extracted from the job description.",
                "properties": {
                    "hardSkills": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "List of technical or domain-specific skills required."
                    },
                    "softSkills": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "List of interpersonal or behavioral skills required."
                    }
                },
                "required": ["hardSkills", "softSkills"]
            },
            "resumeAnalyses": {
                "type": "ARRAY",
                "description": "An analysis for each resume provided.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "fileName": {
                            "type": "STRING",
                            "description": "The name of the resume file."
                        },
                        "finalScore": {
                            "type": "INTEGER",
                            "description": "Overall relevance score from 0 to 100, based on skills match."
                        },
                        "verdict": {
                            "type": "STRING",
                            "description": "A verdict of 'High', 'Medium', or 'Low' relevance."
                        },
                        "hardSkillScore": {
                            "type": "INTEGER",
                            "description": "A score from 0 to 100 based on the hard skills match."
                        },
                        "softSkillScore": {
                            "type": "INTEGER",
                            "description": "A score from 0 to 100 based on the soft skills match."
                        },
                        "matchedSkills": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "A list of skills from the job description that were found in the resume."
                        },
                        "missingSkills": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "A list of skills from the job description that were NOT found in the resume."
                        },
                        "summary": {
                            "type": "STRING",
                            "description": "A concise, one-sentence summary of the candidate's fit for the role."
                        }
                    },
                    "required": [
                        "fileName", "finalScore", "verdict", "hardSkillScore",
                        "softSkillScore", "matchedSkills", "missingSkills", "summary"
                    ]
                }
            }
        },
        "required": ["jdSkills", "resumeAnalyses"]
    })
}
