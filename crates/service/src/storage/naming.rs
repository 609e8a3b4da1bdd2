//! Object names for uploaded record files.

/// Owner codes become a path segment, so they must be one.
pub fn valid_owner_code(code: &str) -> bool {
    let code = code.trim();
    !code.is_empty() && code != "." && code != ".." && !code.contains(['/', '\\'])
}

/// File extension for the handful of content types records carry.
pub fn extension_for(content_type: Option<&str>) -> &'static str {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());
    match essence.as_deref() {
        Some("application/pdf") => ".pdf",
        Some("image/jpeg") | Some("image/jpg") => ".jpg",
        Some("image/png") => ".png",
        Some("image/gif") => ".gif",
        _ => "",
    }
}

pub fn emergency_plan_object(owner_code: &str, slot: &str, content_type: Option<&str>) -> String {
    format!("emergency-plan/{}/{}{}", owner_code.trim(), slot, extension_for(content_type))
}

pub fn house_image_object(owner_code: &str, content_type: Option<&str>) -> String {
    format!("house-image/{}{}", owner_code.trim(), extension_for(content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_ignores_parameters_and_case() {
        assert_eq!(extension_for(Some("Application/PDF; qs=0.9")), ".pdf");
        assert_eq!(extension_for(Some("image/jpeg")), ".jpg");
        assert_eq!(extension_for(Some("text/plain")), "");
        assert_eq!(extension_for(None), "");
    }

    #[test]
    fn names_follow_kind_and_code() {
        assert_eq!(emergency_plan_object("100", "plan", Some("application/pdf")), "emergency-plan/100/plan.pdf");
        assert_eq!(emergency_plan_object("100", "handout", None), "emergency-plan/100/handout");
        assert_eq!(house_image_object("100", Some("image/png")), "house-image/100.png");
    }

    #[test]
    fn owner_code_must_be_a_single_segment() {
        assert!(valid_owner_code("100"));
        assert!(!valid_owner_code(""));
        assert!(!valid_owner_code("  "));
        assert!(!valid_owner_code("1/2"));
        assert!(!valid_owner_code(".."));
    }
}
