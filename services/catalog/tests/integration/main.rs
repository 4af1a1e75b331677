mod challenge_test;
mod helpers;
mod moderation_test;
mod router_test;
mod tool_test;
