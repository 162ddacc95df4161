/// 公开展示用的手机号脱敏：只保留最后 4 位数字
pub fn mask_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let keep = digits.len().min(4);
    let masked = digits.len() - keep;
    let mut out = "*".repeat(masked);
    out.extend(&digits[masked..]);
    out
}
