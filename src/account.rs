/// `account.*` methods.
use log::debug;

use crate::api::VkApi;
use crate::errors::VkError;
use crate::models::SubscribeFilter;
use crate::params::{require_non_empty, VkParameters};
use crate::projection;

/// Methods for the current user's account settings.
#[derive(Debug, Clone, Copy)]
pub struct AccountCategory<'a> {
    api: &'a VkApi,
}

impl<'a> AccountCategory<'a> {
    pub(crate) fn new(api: &'a VkApi) -> Self {
        Self { api }
    }

    /// account.setNameInMenu - Set the application name shown in the left menu.
    pub fn set_name_in_menu(&self, name: &str) -> Result<bool, VkError> {
        debug!("account.set_name_in_menu name={}", name);
        require_non_empty("name", name)?;
        let params = VkParameters::new().with("name", name);
        projection::to_bool(&self.api.call("account.setNameInMenu", &params)?)
    }

    /// account.setOnline - Mark the user online for 15 minutes.
    pub fn set_online(&self, voip: Option<bool>) -> Result<bool, VkError> {
        debug!("account.set_online voip={:?}", voip);
        let params = VkParameters::new().with("voip", voip);
        projection::to_bool(&self.api.call("account.setOnline", &params)?)
    }

    /// account.setOffline - Mark the user offline.
    pub fn set_offline(&self) -> Result<bool, VkError> {
        debug!("account.set_offline");
        projection::to_bool(&self.api.call("account.setOffline", &VkParameters::new())?)
    }

    /// account.registerDevice - Subscribe a device to push notifications.
    pub fn register_device(
        &self,
        token: &str,
        device_model: Option<&str>,
        system_version: Option<&str>,
        no_text: Option<bool>,
        subscribe: Option<SubscribeFilter>,
    ) -> Result<bool, VkError> {
        debug!(
            "account.register_device device_model={:?} system_version={:?} no_text={:?} subscribe={:?}",
            device_model, system_version, no_text, subscribe
        );
        require_non_empty("token", token)?;
        let params = VkParameters::new()
            .with("token", token)
            .with("device_model", device_model)
            .with("system_version", system_version)
            .with("no_text", no_text)
            .with("subscribe", subscribe);
        projection::to_bool(&self.api.call("account.registerDevice", &params)?)
    }

    /// account.unregisterDevice - Unsubscribe a device from push notifications.
    pub fn unregister_device(&self, token: &str) -> Result<bool, VkError> {
        debug!("account.unregister_device");
        require_non_empty("token", token)?;
        let params = VkParameters::new().with("token", token);
        projection::to_bool(&self.api.call("account.unregisterDevice", &params)?)
    }

    /// account.setSilenceMode - Mute push notifications.
    ///
    /// `time` is in seconds; `-1` mutes forever. `chat_id` and `user_id`
    /// narrow the mute to one conversation.
    pub fn set_silence_mode(
        &self,
        token: &str,
        time: Option<i64>,
        chat_id: Option<i64>,
        user_id: Option<i64>,
        sound: Option<bool>,
    ) -> Result<bool, VkError> {
        debug!(
            "account.set_silence_mode time={:?} chat_id={:?} user_id={:?} sound={:?}",
            time, chat_id, user_id, sound
        );
        require_non_empty("token", token)?;
        let params = VkParameters::new()
            .with("token", token)
            .with("time", time)
            .with("chat_id", chat_id)
            .with("user_id", user_id)
            .with("sound", sound);
        projection::to_bool(&self.api.call("account.setSilenceMode", &params)?)
    }
}
