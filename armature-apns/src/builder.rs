//! Notification builder.

use tracing::{debug, trace};
use uuid::Uuid;

use crate::notification::EXPIRATION_UNSET;
use crate::order::KeyOrder;
use crate::value::{MapView, PayloadMap, PayloadValue};
use crate::{InterruptionLevel, Notification, Priority, Result};

const APS: &str = "aps";
const ALERT: &str = "alert";
const SOUND: &str = "sound";

/// Builds APNS notifications.
///
/// The builder keeps three trees: custom root fields, the `aps` dictionary
/// and the `alert` dictionary. [`build`](Self::build) nests them as
/// `{..., "aps": {..., "alert": {...}}}` and serializes the result. The
/// builder stays usable afterwards; every build reflects its current state.
///
/// ```
/// use armature_apns::{InterruptionLevel, NotificationBuilder};
///
/// let notification = NotificationBuilder::new("device-token")
///     .alert_title("Hello")
///     .alert_body("You have a new message")
///     .interruption_level(Some(InterruptionLevel::Active))
///     .badge(1)
///     .build()
///     .unwrap();
///
/// assert_eq!(notification.token(), "device-token");
/// ```
#[derive(Debug, Clone)]
pub struct NotificationBuilder {
    root: PayloadMap,
    aps: PayloadMap,
    alert: PayloadMap,
    token: String,
    topic: Option<String>,
    collapse_id: Option<String>,
    expiration: i64,
    priority: Option<Priority>,
    push_type: Option<String>,
    uuid: Option<Uuid>,
    key_order: KeyOrder,
}

impl NotificationBuilder {
    /// Create a builder for the given device token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            root: PayloadMap::new(),
            aps: PayloadMap::new(),
            alert: PayloadMap::new(),
            token: token.into(),
            topic: None,
            collapse_id: None,
            expiration: EXPIRATION_UNSET,
            priority: None,
            push_type: None,
            uuid: None,
            key_order: KeyOrder::default(),
        }
    }

    /// The device token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Set the key order used when serializing.
    pub fn key_order(&mut self, order: KeyOrder) -> &mut Self {
        self.key_order = order;
        self
    }

    fn aps_flag(&mut self, key: &'static str, enabled: bool) -> &mut Self {
        if enabled {
            self.aps.insert(key, 1);
        } else {
            self.aps.remove(key);
        }
        self
    }

    fn aps_or_remove(&mut self, key: &'static str, value: Option<PayloadValue>) -> &mut Self {
        match value {
            Some(value) => {
                self.aps.insert(key, value);
            }
            None => {
                self.aps.remove(key);
            }
        }
        self
    }

    fn alert_field(&mut self, key: &'static str, value: impl Into<PayloadValue>) -> &mut Self {
        self.alert.insert(key, value);
        self
    }

    fn text_list<I, S>(items: I) -> PayloadValue
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PayloadValue::Array(items.into_iter().map(|s| PayloadValue::Text(s.into())).collect())
    }

    // aps flags

    /// Set or clear `mutable-content`.
    pub fn mutable_content(&mut self, mutable: bool) -> &mut Self {
        self.aps_flag("mutable-content", mutable)
    }

    /// Set `mutable-content`.
    pub fn with_mutable_content(&mut self) -> &mut Self {
        self.mutable_content(true)
    }

    /// Set or clear `content-available`.
    pub fn content_available(&mut self, available: bool) -> &mut Self {
        self.aps_flag("content-available", available)
    }

    /// Set `content-available`.
    pub fn with_content_available(&mut self) -> &mut Self {
        self.content_available(true)
    }

    // alert dictionary

    /// Set the alert body.
    pub fn alert_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.alert_field("body", body.into())
    }

    /// Set the alert title.
    pub fn alert_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.alert_field("title", title.into())
    }

    /// Set the alert subtitle.
    pub fn subtitle(&mut self, subtitle: impl Into<String>) -> &mut Self {
        self.alert_field("subtitle", subtitle.into())
    }

    /// Set the launch image.
    pub fn launch_image(&mut self, launch_image: impl Into<String>) -> &mut Self {
        self.alert_field("launch-image", launch_image.into())
    }

    /// Set the localization key of the title.
    pub fn title_loc_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.alert_field("title-loc-key", key.into())
    }

    /// Set the localization arguments of the title.
    pub fn title_loc_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alert_field("title-loc-args", Self::text_list(args))
    }

    /// Set the localization key of the subtitle.
    pub fn subtitle_loc_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.alert_field("subtitle-loc-key", key.into())
    }

    /// Set the localization arguments of the subtitle.
    pub fn subtitle_loc_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alert_field("subtitle-loc-args", Self::text_list(args))
    }

    /// Set the localization key of the body.
    pub fn loc_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.alert_field("loc-key", key.into())
    }

    /// Set the localization arguments of the body.
    pub fn loc_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alert_field("loc-args", Self::text_list(args))
    }

    // aps dictionary

    /// Set the Safari `url-args`.
    pub fn url_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aps.insert("url-args", Self::text_list(args));
        self
    }

    /// Set the sound by name, replacing any sound dictionary. `None` removes
    /// the sound.
    pub fn sound(&mut self, sound: Option<impl Into<String>>) -> &mut Self {
        self.aps_or_remove(SOUND, sound.map(|s| PayloadValue::Text(s.into())))
    }

    /// Set the whole sound dictionary. `None` removes the sound.
    pub fn sound_dict(&mut self, sound: Option<impl Into<PayloadMap>>) -> &mut Self {
        self.aps_or_remove(SOUND, sound.map(|s| PayloadValue::Object(s.into())))
    }

    /// Set the category. `None` removes it.
    pub fn category(&mut self, category: Option<impl Into<String>>) -> &mut Self {
        self.aps_or_remove("category", category.map(|c| PayloadValue::Text(c.into())))
    }

    /// Set the badge count.
    pub fn badge(&mut self, badge: i32) -> &mut Self {
        self.aps.insert("badge", badge);
        self
    }

    /// Set the thread ID used for grouping. `None` removes it.
    pub fn thread_id(&mut self, thread_id: Option<impl Into<String>>) -> &mut Self {
        self.aps_or_remove("thread-id", thread_id.map(|t| PayloadValue::Text(t.into())))
    }

    /// Set the target content ID. `None` removes it.
    pub fn target_content_id(&mut self, id: Option<impl Into<String>>) -> &mut Self {
        self.aps_or_remove("target-content-id", id.map(|i| PayloadValue::Text(i.into())))
    }

    /// Set the focus filter criteria. `None` removes it.
    pub fn filter_criteria(&mut self, criteria: Option<impl Into<String>>) -> &mut Self {
        self.aps_or_remove("filter-criteria", criteria.map(|c| PayloadValue::Text(c.into())))
    }

    /// Set the relevance score.
    ///
    /// Scores outside `0.0..=1.0` are ignored and leave any existing score
    /// in place.
    pub fn relevance_score(&mut self, score: f64) -> &mut Self {
        if (0.0..=1.0).contains(&score) {
            self.aps.insert("relevance-score", score);
        } else {
            trace!(score, "Ignoring relevance score outside 0..=1");
        }
        self
    }

    /// Remove the relevance score.
    pub fn reset_relevance_score(&mut self) -> &mut Self {
        self.aps.remove("relevance-score");
        self
    }

    /// Set the interruption level. `None` leaves the current level as is.
    pub fn interruption_level(&mut self, level: Option<InterruptionLevel>) -> &mut Self {
        if let Some(level) = level {
            self.aps.insert("interruption-level", level.as_str());
        }
        self
    }

    /// Remove the interruption level.
    pub fn reset_interruption_level(&mut self) -> &mut Self {
        self.aps.remove("interruption-level");
        self
    }

    // sound dictionary

    fn update_sound(&mut self, update: impl FnOnce(&mut PayloadMap)) -> &mut Self {
        match self.aps.get_mut(SOUND) {
            Some(PayloadValue::Object(sound)) => update(sound),
            _ => {
                let mut sound = PayloadMap::new();
                update(&mut sound);
                self.aps.insert(SOUND, sound);
            }
        }
        self
    }

    /// Set `critical` in the sound dictionary.
    pub fn sound_critical(&mut self, critical: i32) -> &mut Self {
        self.update_sound(|sound| {
            sound.insert("critical", critical);
        })
    }

    /// Set `name` in the sound dictionary. `None` removes only the name.
    pub fn sound_name(&mut self, name: Option<impl Into<String>>) -> &mut Self {
        let name: Option<String> = name.map(Into::into);
        self.update_sound(|sound| match name {
            Some(name) => {
                sound.insert("name", name);
            }
            None => {
                sound.remove("name");
            }
        })
    }

    /// Set `volume` in the sound dictionary.
    pub fn sound_volume(&mut self, volume: f64) -> &mut Self {
        self.update_sound(|sound| {
            sound.insert("volume", volume);
        })
    }

    // live activities

    /// Set the stale date (UNIX seconds).
    pub fn stale_date(&mut self, date: i64) -> &mut Self {
        self.aps.insert("stale-date", date);
        self
    }

    /// Set the content state. `None` removes it.
    pub fn content_state(&mut self, state: Option<impl Into<PayloadMap>>) -> &mut Self {
        self.aps_or_remove("content-state", state.map(|s| PayloadValue::Object(s.into())))
    }

    /// Set the update timestamp (UNIX seconds).
    pub fn timestamp(&mut self, timestamp: i64) -> &mut Self {
        self.aps.insert("timestamp", timestamp);
        self
    }

    /// Set the event (`start`, `update`, `end`). `None` removes it.
    pub fn event(&mut self, event: Option<impl Into<String>>) -> &mut Self {
        self.aps_or_remove("event", event.map(|e| PayloadValue::Text(e.into())))
    }

    /// Set the dismissal date (UNIX seconds).
    pub fn dismissal_date(&mut self, date: i64) -> &mut Self {
        self.aps.insert("dismissal-date", date);
        self
    }

    /// Set the attributes type. `None` removes it.
    pub fn attributes_type(&mut self, attributes_type: Option<impl Into<String>>) -> &mut Self {
        self.aps_or_remove(
            "attributes-type",
            attributes_type.map(|t| PayloadValue::Text(t.into())),
        )
    }

    /// Set the attributes. `None` removes them.
    pub fn attributes(&mut self, attributes: Option<impl Into<PayloadMap>>) -> &mut Self {
        self.aps_or_remove("attributes", attributes.map(|a| PayloadValue::Object(a.into())))
    }

    // root and metadata

    /// Set a custom top-level field.
    pub fn custom_field(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PayloadValue>,
    ) -> &mut Self {
        self.root.insert(key, value);
        self
    }

    /// Set the topic.
    pub fn topic(&mut self, topic: impl Into<String>) -> &mut Self {
        self.topic = Some(topic.into());
        self
    }

    /// Set the collapse ID.
    pub fn collapse_id(&mut self, collapse_id: impl Into<String>) -> &mut Self {
        self.collapse_id = Some(collapse_id.into());
        self
    }

    /// Set the expiration (UNIX seconds). `0` is a valid value.
    pub fn expiration(&mut self, expiration: i64) -> &mut Self {
        self.expiration = expiration;
        self
    }

    /// Set the notification ID.
    pub fn uuid(&mut self, uuid: Uuid) -> &mut Self {
        self.uuid = Some(uuid);
        self
    }

    /// Set the priority.
    pub fn priority(&mut self, priority: Priority) -> &mut Self {
        self.priority = Some(priority);
        self
    }

    /// Set the push type.
    pub fn push_type(&mut self, push_type: impl Into<String>) -> &mut Self {
        self.push_type = Some(push_type.into());
        self
    }

    // terminal operations

    /// Serialize the current state into a new notification.
    ///
    /// Reserves the `aps` slot in the root and the `alert` slot in `aps`;
    /// nothing else changes, so the builder can keep being modified and
    /// built again.
    pub fn build(&mut self) -> Result<Notification> {
        self.root.insert(APS, PayloadValue::Null);
        self.aps.insert(ALERT, PayloadValue::Null);

        let alert = MapView::new(&self.alert, self.key_order);
        let aps = MapView::new(&self.aps, self.key_order).splice(ALERT, alert);
        let root = MapView::new(&self.root, self.key_order).splice(APS, aps);
        let payload = serde_json::to_string(&root)?;

        debug!(token = %self.token, size = payload.len(), "Built APNS notification");

        Ok(Notification::new(
            payload,
            self.token.clone(),
            self.topic.clone(),
            self.collapse_id.clone(),
            self.expiration,
            self.priority,
            self.push_type.clone(),
            self.uuid,
        ))
    }

    /// Size in bytes of the payload [`build`](Self::build) produces.
    pub fn size(&mut self) -> Result<usize> {
        Ok(self.build()?.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(builder: &mut NotificationBuilder) -> String {
        builder.build().unwrap().payload().to_string()
    }

    #[test]
    fn test_default_payload() {
        let mut builder = NotificationBuilder::new("token");
        assert_eq!(payload(&mut builder), r#"{"aps":{"alert":{}}}"#);
    }

    #[test]
    fn test_notification_builder() {
        let mut builder = NotificationBuilder::new("token");
        builder
            .relevance_score(0.1)
            .interruption_level(Some(InterruptionLevel::Passive))
            .mutable_content(true)
            .alert_body("body")
            .alert_title("title")
            .category(Some("cat1"))
            .priority(Priority::Immediate);

        assert_eq!(
            payload(&mut builder),
            r#"{"aps":{"interruption-level":"passive","relevance-score":0.1,"alert":{"body":"body","title":"title"},"category":"cat1","mutable-content":1}}"#
        );
    }

    #[test]
    fn test_notification_builder_with_reset_options() {
        let mut builder = NotificationBuilder::new("token");
        builder
            .relevance_score(0.1)
            .interruption_level(Some(InterruptionLevel::Passive))
            .mutable_content(true)
            .alert_body("body")
            .alert_title("title")
            .category(Some("cat1"))
            .priority(Priority::Immediate)
            .reset_relevance_score()
            .reset_interruption_level();

        assert_eq!(
            payload(&mut builder),
            r#"{"aps":{"alert":{"body":"body","title":"title"},"category":"cat1","mutable-content":1}}"#
        );
    }

    #[test]
    fn test_relevance_score_range() {
        let cases = [
            (0.0, r#"{"aps":{"relevance-score":0.0,"alert":{}}}"#),
            (1.0, r#"{"aps":{"relevance-score":1.0,"alert":{}}}"#),
            (0.75, r#"{"aps":{"relevance-score":0.75,"alert":{}}}"#),
            (5.0, r#"{"aps":{"alert":{}}}"#),
            (-1.0, r#"{"aps":{"alert":{}}}"#),
            (f64::NAN, r#"{"aps":{"alert":{}}}"#),
        ];

        for (score, expected) in cases {
            let mut builder = NotificationBuilder::new("token");
            builder.relevance_score(score);
            assert_eq!(payload(&mut builder), expected, "score {}", score);
        }
    }

    #[test]
    fn test_out_of_range_score_keeps_existing() {
        let mut builder = NotificationBuilder::new("token");
        builder.relevance_score(0.5).relevance_score(2.0);
        assert_eq!(
            payload(&mut builder),
            r#"{"aps":{"relevance-score":0.5,"alert":{}}}"#
        );
    }

    #[test]
    fn test_interruption_levels() {
        for level in InterruptionLevel::ALL {
            let mut builder = NotificationBuilder::new("token");
            builder.interruption_level(Some(level));
            assert_eq!(
                payload(&mut builder),
                format!(r#"{{"aps":{{"interruption-level":"{}","alert":{{}}}}}}"#, level)
            );
        }

        let mut builder = NotificationBuilder::new("token");
        builder.interruption_level(None);
        assert_eq!(payload(&mut builder), r#"{"aps":{"alert":{}}}"#);
    }

    #[test]
    fn test_none_interruption_level_keeps_existing() {
        let mut builder = NotificationBuilder::new("token");
        builder
            .interruption_level(Some(InterruptionLevel::Critical))
            .interruption_level(None);
        assert!(payload(&mut builder).contains(r#""interruption-level":"critical""#));
    }

    #[test]
    fn test_reset_after_build() {
        let mut builder = NotificationBuilder::new("token");
        builder.relevance_score(0.5);
        assert_eq!(
            payload(&mut builder),
            r#"{"aps":{"relevance-score":0.5,"alert":{}}}"#
        );

        builder.reset_relevance_score();
        assert_eq!(payload(&mut builder), r#"{"aps":{"alert":{}}}"#);

        builder.interruption_level(Some(InterruptionLevel::Active));
        assert_eq!(
            payload(&mut builder),
            r#"{"aps":{"interruption-level":"active","alert":{}}}"#
        );

        builder.reset_interruption_level();
        assert_eq!(payload(&mut builder), r#"{"aps":{"alert":{}}}"#);
    }

    #[test]
    fn test_flags_toggle() {
        let mut builder = NotificationBuilder::new("token");
        builder.with_mutable_content().with_content_available();
        let json = payload(&mut builder);
        assert!(json.contains(r#""mutable-content":1"#));
        assert!(json.contains(r#""content-available":1"#));

        builder.mutable_content(false).content_available(false);
        assert_eq!(payload(&mut builder), r#"{"aps":{"alert":{}}}"#);
    }

    #[test]
    fn test_none_removes_optional_fields() {
        let mut builder = NotificationBuilder::new("token");
        builder
            .sound(Some("default"))
            .category(Some("cat"))
            .thread_id(Some("thread"))
            .target_content_id(Some("target"))
            .filter_criteria(Some("work"))
            .event(Some("update"))
            .attributes_type(Some("Scores"))
            .attributes(Some(PayloadMap::from_iter([("home", 1)])))
            .content_state(Some(PayloadMap::from_iter([("away", 2)])));
        assert_ne!(payload(&mut builder), r#"{"aps":{"alert":{}}}"#);

        builder
            .sound(None::<&str>)
            .category(None::<&str>)
            .thread_id(None::<&str>)
            .target_content_id(None::<&str>)
            .filter_criteria(None::<&str>)
            .event(None::<&str>)
            .attributes_type(None::<&str>)
            .attributes(None::<PayloadMap>)
            .content_state(None::<PayloadMap>);
        assert_eq!(payload(&mut builder), r#"{"aps":{"alert":{}}}"#);

        builder.sound_dict(Some(PayloadMap::from_iter([("name", "chime")])));
        assert_eq!(
            payload(&mut builder),
            r#"{"aps":{"alert":{},"sound":{"name":"chime"}}}"#
        );

        builder.sound_dict(None::<PayloadMap>);
        assert_eq!(payload(&mut builder), r#"{"aps":{"alert":{}}}"#);
    }

    #[test]
    fn test_removing_absent_field_is_noop() {
        let mut builder = NotificationBuilder::new("token");
        builder
            .category(None::<&str>)
            .reset_relevance_score()
            .mutable_content(false);
        assert_eq!(payload(&mut builder), r#"{"aps":{"alert":{}}}"#);
    }

    #[test]
    fn test_sound_dictionary_fields() {
        let mut builder = NotificationBuilder::new("token");
        builder
            .sound_critical(1)
            .sound_name(Some("alarm.caf"))
            .sound_volume(0.5)
            .key_order(KeyOrder::Insertion);
        assert_eq!(
            payload(&mut builder),
            r#"{"aps":{"sound":{"critical":1,"name":"alarm.caf","volume":0.5},"alert":{}}}"#
        );

        builder.sound_name(None::<&str>);
        assert_eq!(
            payload(&mut builder),
            r#"{"aps":{"sound":{"critical":1,"volume":0.5},"alert":{}}}"#
        );
    }

    #[test]
    fn test_non_finite_volume_is_null() {
        let mut builder = NotificationBuilder::new("token");
        builder.sound_volume(f64::NAN);
        assert_eq!(
            payload(&mut builder),
            r#"{"aps":{"alert":{},"sound":{"volume":null}}}"#
        );
    }

    #[test]
    fn test_sound_name_none_without_dictionary() {
        let mut builder = NotificationBuilder::new("token");
        builder.sound_name(None::<&str>);
        assert_eq!(payload(&mut builder), r#"{"aps":{"alert":{},"sound":{}}}"#);
    }

    #[test]
    fn test_sound_string_replaces_dictionary() {
        let mut builder = NotificationBuilder::new("token");
        builder.sound_name(Some("x")).sound(Some("plain"));
        assert_eq!(
            payload(&mut builder),
            r#"{"aps":{"alert":{},"sound":"plain"}}"#
        );

        let mut builder = NotificationBuilder::new("token");
        builder.sound(Some("plain")).sound_name(Some("x"));
        assert_eq!(
            payload(&mut builder),
            r#"{"aps":{"alert":{},"sound":{"name":"x"}}}"#
        );
    }

    #[test]
    fn test_metadata_is_not_in_payload() {
        let uuid = Uuid::new_v4();
        let mut builder = NotificationBuilder::new("token");
        builder
            .topic("com.example.app")
            .collapse_id("collapse")
            .expiration(0)
            .priority(Priority::PowerConsideration)
            .push_type("background")
            .uuid(uuid);

        let notification = builder.build().unwrap();
        assert_eq!(notification.payload(), r#"{"aps":{"alert":{}}}"#);
        assert_eq!(notification.token(), "token");
        assert_eq!(notification.topic(), Some("com.example.app"));
        assert_eq!(notification.collapse_id(), Some("collapse"));
        assert_eq!(notification.expiration(), Some(0));
        assert_eq!(notification.priority(), Some(Priority::PowerConsideration));
        assert_eq!(notification.push_type(), Some("background"));
        assert_eq!(notification.uuid(), Some(uuid));
    }

    #[test]
    fn test_expiration_defaults_to_unset() {
        let notification = NotificationBuilder::new("token").build().unwrap();
        assert_eq!(notification.expiration(), None);
        assert!(notification.headers().iter().all(|(name, _)| *name != "apns-expiration"));
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut builder = NotificationBuilder::new("token");
        builder
            .alert_body("body")
            .badge(3)
            .custom_field("acme", "value");

        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first.payload(), second.payload());
    }

    #[test]
    fn test_built_notification_is_detached() {
        let mut builder = NotificationBuilder::new("token");
        builder.alert_body("first");
        let first = builder.build().unwrap();

        builder.alert_body("second");
        let second = builder.build().unwrap();

        assert!(first.payload().contains("first"));
        assert!(second.payload().contains("second"));
    }

    #[test]
    fn test_custom_fields_wrap_aps() {
        let mut builder = NotificationBuilder::new("token");
        builder
            .custom_field("acme1", "bar")
            .custom_field("acme2", vec![42, 43])
            .key_order(KeyOrder::Insertion);

        assert_eq!(
            payload(&mut builder),
            r#"{"acme1":"bar","acme2":[42,43],"aps":{"alert":{}}}"#
        );
    }

    #[test]
    fn test_insertion_order_places_alert_on_first_build() {
        let mut builder = NotificationBuilder::new("token");
        builder
            .key_order(KeyOrder::Insertion)
            .mutable_content(true)
            .category(Some("cat1"))
            .alert_title("title");

        assert_eq!(
            payload(&mut builder),
            r#"{"aps":{"mutable-content":1,"category":"cat1","alert":{"title":"title"}}}"#
        );
    }

    #[test]
    fn test_alert_fields() {
        let mut builder = NotificationBuilder::new("token");
        builder
            .subtitle("sub")
            .launch_image("launch.png")
            .loc_key("BODY_KEY")
            .loc_args(["a", "b"])
            .title_loc_key("LOC_KEY")
            .title_loc_args(vec!["arg1".to_string(), "arg2".to_string()])
            .subtitle_loc_key("SUB_KEY")
            .subtitle_loc_args(["sub1", "sub2"]);

        let json = payload(&mut builder);
        assert!(json.contains(r#""subtitle":"sub""#));
        assert!(json.contains(r#""launch-image":"launch.png""#));
        assert!(json.contains(r#""loc-key":"BODY_KEY""#));
        assert!(json.contains(r#""loc-args":["a","b"]"#));
        assert!(json.contains(r#""title-loc-key":"LOC_KEY""#));
        assert!(json.contains(r#""title-loc-args":["arg1","arg2"]"#));
        assert!(json.contains(r#""subtitle-loc-key":"SUB_KEY""#));
        assert!(json.contains(r#""subtitle-loc-args":["sub1","sub2"]"#));
    }

    #[test]
    fn test_live_activity_fields() {
        let mut builder = NotificationBuilder::new("token");
        builder
            .stale_date(987654321)
            .timestamp(1_700_000_000)
            .dismissal_date(1_700_003_600)
            .url_args(["path"]);

        let json = payload(&mut builder);
        assert!(json.contains(r#""stale-date":987654321"#));
        assert!(json.contains(r#""timestamp":1700000000"#));
        assert!(json.contains(r#""dismissal-date":1700003600"#));
        assert!(json.contains(r#""url-args":["path"]"#));
        assert!(json.contains(r#""alert":{}"#));
    }

    #[test]
    fn test_size_counts_utf8_bytes() {
        let mut builder = NotificationBuilder::new("token");
        builder.alert_body("é");
        let size = builder.size().unwrap();
        assert_eq!(size, builder.build().unwrap().payload().len());
        assert_eq!(size, r#"{"aps":{"alert":{"body":"é"}}}"#.len());
    }
}
