//! Aggregate statistics over the user base, for the admin panel.

#[derive(Debug, Clone, Default)]
pub struct BotStats {
    pub total_users: i64,
    pub new_today: i64,
    pub new_week: i64,
    pub new_month: i64,
    pub with_email: i64,
    pub with_phone: i64,
    pub with_name: i64,
    pub with_contact: i64,
    pub referrals: i64,
}
