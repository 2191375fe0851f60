//! The provider's user record and its plain-text rendering.

// self
use crate::_prelude::*;

/// Flat user record mirroring the provider's `ShortUserModel` schema.
///
/// Every field is provider-defined and opaque to the relay: the record is decoded structurally,
/// rendered once into the callback response, then discarded with the request. Field names follow
/// the provider's PascalCase JSON keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserProfile {
	/// Numeric user identifier.
	#[serde(rename = "ID")]
	pub id: i64,
	/// Display name.
	pub name: String,
	/// Surname.
	pub surname: String,
	/// Profile link slug.
	pub link: String,
	/// Numeric avatar selector.
	pub avatar: i64,
	/// Numeric subscription tier.
	pub sub: i64,
	/// Verification status string.
	pub verify: String,
	/// Numeric ban flag.
	pub ban: i64,
	/// Emoji decoration string.
	pub emoji: String,
	/// Numeric cosmetic-avatar flag.
	pub cosmetic_avatar: i64,
	/// Numeric comment-visibility setting.
	pub comments_state: i64,
	/// Relationship-state string.
	pub relationship_state: String,
}
impl Display for UserProfile {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		writeln!(f, "ID: {}", self.id)?;
		writeln!(f, "Name: {}", self.name)?;
		writeln!(f, "Surname: {}", self.surname)?;
		writeln!(f, "Link: {}", self.link)?;
		writeln!(f, "Avatar: {}", self.avatar)?;
		writeln!(f, "Sub: {}", self.sub)?;
		writeln!(f, "Verify: {}", self.verify)?;
		writeln!(f, "Ban: {}", self.ban)?;
		writeln!(f, "Emoji: {}", self.emoji)?;
		writeln!(f, "CosmeticAvatar: {}", self.cosmetic_avatar)?;
		writeln!(f, "CommentsState: {}", self.comments_state)?;
		write!(f, "RelationshipState: {}", self.relationship_state)
	}
}
