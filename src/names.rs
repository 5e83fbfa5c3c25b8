// Point values
pub const CORRECT_ANSWER_POINTS: i64 = 3;
pub const SHARE_REWARD_POINTS: i64 = 1;

// Season shape
pub const SEASON_MAX_DAYS: u32 = 30;

// Leaderboards
pub const LEADERBOARD_LIMIT: i64 = 50;

// Question defaults
pub const DEFAULT_TIMER_SECONDS: i64 = 30;
pub const DEFAULT_QUESTION_STATUS: &str = "draft";
pub const PUBLISHED_STATUS: &str = "published";

// Roles
pub const USER_ROLE: &str = "user";

// Competition routes
pub const STATUS_URL: &str = "/api/status";
pub const TODAY_QUESTION_URL: &str = "/api/today-question";
pub const SUBMIT_ANSWER_URL: &str = "/api/submit-answer";
pub const TODAY_RESULT_URL: &str = "/api/today-result";
pub const MY_ANSWER_URL: &str = "/api/my-answer/{user_id}";
pub const LEADERBOARD_URL: &str = "/api/leaderboard";
pub const YESTERDAY_WINNER_URL: &str = "/api/yesterday-winner";

// Challenge routes
pub const CHALLENGES_URL: &str = "/api/challenges";
pub const SMART_COMPLETION_URL: &str = "/api/smart-completion";
pub const COMPLETE_CHALLENGE_URL: &str = "/api/challenges/complete";
pub const CHALLENGE_STATUS_URL: &str = "/api/challenges/my-status/{user_id}";
pub const CHALLENGE_LEADERBOARD_URL: &str = "/api/challenges/leaderboard";
pub const SHARE_REWARD_URL: &str = "/api/share-reward";

// Account routes
pub const REGISTER_URL: &str = "/api/register";
pub const LOGIN_URL: &str = "/api/login";
pub const PROFILE_URL: &str = "/api/profile/{user_id}";
pub const UPDATE_PROFILE_URL: &str = "/api/profile";

// Imsakia & content routes
pub const IMSAKIA_URL: &str = "/api/imsakia";
pub const IMSAKIA_TODAY_URL: &str = "/api/imsakia/today";
pub const CONTENT_URL: &str = "/api/content/{content_type}";
pub const PLAYLISTS_URL: &str = "/api/playlists";
pub const PLAYLIST_URL: &str = "/api/playlists/{id}";
pub const PLAYLIST_VIDEOS_URL: &str = "/api/playlists/{id}/videos";

// Admin routes
pub const ADMIN_STATS_URL: &str = "/api/admin/stats";
pub const ADMIN_SEASONS_URL: &str = "/api/admin/seasons";
pub const ADMIN_SEASON_QUESTIONS_URL: &str = "/api/admin/seasons/{id}/questions";
pub const ADMIN_QUESTIONS_URL: &str = "/api/admin/questions";
pub const ADMIN_QUESTION_URL: &str = "/api/admin/questions/{id}";
pub const ADMIN_QUESTION_ANSWERS_URL: &str = "/api/admin/questions/{id}/answers";
pub const ADMIN_USERS_URL: &str = "/api/admin/users";
pub const ADMIN_USER_URL: &str = "/api/admin/users/{id}";
pub const ADMIN_RESULTS_URL: &str = "/api/admin/results";
pub const ADMIN_ANNOUNCE_WINNER_URL: &str = "/api/admin/announce-winner";
pub const ADMIN_CONTENT_URL: &str = "/api/admin/content";
pub const ADMIN_CONTENT_ITEM_URL: &str = "/api/admin/content/{id}";
pub const ADMIN_PLAYLISTS_URL: &str = "/api/admin/playlists";
pub const ADMIN_PLAYLIST_URL: &str = "/api/admin/playlists/{id}";
pub const ADMIN_PLAYLIST_VIDEOS_URL: &str = "/api/admin/playlists/{id}/videos";
pub const ADMIN_VIDEO_URL: &str = "/api/admin/videos/{id}";
pub const ADMIN_UPLOAD_IMSAKIA_URL: &str = "/api/admin/upload-imsakia";
