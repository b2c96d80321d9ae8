//! SDL2_mixer calls

use std::ptr::NonNull;

use sdl2_sys as sys;
use sys::mixer as mix;

use super::{c_ptr, c_string, c_string_opt, from_c, is_true, Sdl};
use crate::backend::Mixer;
use crate::foundation::handle::NativeResource;

impl NativeResource for mix::Mix_Chunk {
    const KIND: &'static str = "chunk";

    unsafe fn release(raw: NonNull<Self>) {
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { mix::Mix_FreeChunk(raw.as_ptr()) }
    }
}

impl NativeResource for mix::Mix_Music {
    const KIND: &'static str = "music";

    unsafe fn release(raw: NonNull<Self>) {
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { mix::Mix_FreeMusic(raw.as_ptr()) }
    }
}

impl Mixer for Sdl {
    type Chunk = mix::Mix_Chunk;
    type Music = mix::Mix_Music;

    fn mix_init(flags: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_Init(flags) }
    }

    fn mix_quit() {
        // SAFETY: plain library call
        unsafe { mix::Mix_Quit() }
    }

    fn open_audio(frequency: i32, format: u16, channels: i32, chunk_size: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_OpenAudio(frequency, format, channels, chunk_size) }
    }

    fn open_audio_device(
        frequency: i32,
        format: u16,
        channels: i32,
        chunk_size: i32,
        device: Option<&str>,
        allowed_changes: i32,
    ) -> i32 {
        let device = c_string_opt(device);
        // SAFETY: C strings outlive the call
        unsafe { mix::Mix_OpenAudioDevice(frequency, format, channels, chunk_size, c_ptr(device.as_ref()), allowed_changes) }
    }

    fn allocate_channels(count: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_AllocateChannels(count) }
    }

    fn query_spec(frequency: &mut i32, format: &mut u16, channels: &mut i32) -> i32 {
        // SAFETY: out-parameters are valid for writes
        unsafe { mix::Mix_QuerySpec(frequency, format, channels) }
    }

    fn close_audio() {
        // SAFETY: plain library call
        unsafe { mix::Mix_CloseAudio() }
    }

    fn set_synchro_value(value: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_SetSynchroValue(value) }
    }

    fn synchro_value() -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_GetSynchroValue() }
    }

    fn set_sound_fonts(paths: &str) -> i32 {
        let paths = c_string(paths);
        // SAFETY: C strings outlive the call
        unsafe { mix::Mix_SetSoundFonts(paths.as_ptr()) }
    }

    fn sound_fonts() -> Option<String> {
        // SAFETY: the native string is NUL-terminated or null
        unsafe { from_c(mix::Mix_GetSoundFonts()) }
    }

    fn load_wav(path: &str) -> *mut Self::Chunk {
        let path = c_string(path);
        // SAFETY: C strings outlive the call
        unsafe { mix::Mix_LoadWAV_RW(sys::SDL_RWFromFile(path.as_ptr(), c"rb".as_ptr()).cast(), 1) }
    }

    fn num_chunk_decoders() -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_GetNumChunkDecoders() }
    }

    fn chunk_decoder(index: i32) -> Option<String> {
        // SAFETY: the native string is NUL-terminated or null
        unsafe { from_c(mix::Mix_GetChunkDecoder(index)) }
    }

    fn has_chunk_decoder(name: &str) -> bool {
        let name = c_string(name);
        // SAFETY: C strings outlive the call
        is_true(unsafe { mix::Mix_HasChunkDecoder(name.as_ptr()) })
    }

    fn volume_chunk(chunk: NonNull<Self::Chunk>, volume: i32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { mix::Mix_VolumeChunk(chunk.as_ptr(), volume) }
    }

    fn play_channel_timed(channel: i32, chunk: NonNull<Self::Chunk>, loops: i32, ticks: i32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { mix::Mix_PlayChannelTimed(channel, chunk.as_ptr(), loops, ticks) }
    }

    fn fade_in_channel_timed(channel: i32, chunk: NonNull<Self::Chunk>, loops: i32, ms: i32, ticks: i32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { mix::Mix_FadeInChannelTimed(channel, chunk.as_ptr(), loops, ms, ticks) }
    }

    fn volume(channel: i32, volume: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_Volume(channel, volume) }
    }

    fn halt_channel(channel: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_HaltChannel(channel) }
    }

    fn expire_channel(channel: i32, ticks: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_ExpireChannel(channel, ticks) }
    }

    fn fade_out_channel(channel: i32, ms: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_FadeOutChannel(channel, ms) }
    }

    fn playing(channel: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_Playing(channel) }
    }

    fn paused(channel: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_Paused(channel) }
    }

    fn fading_channel(channel: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_FadingChannel(channel) as i32 }
    }

    fn pause(channel: i32) {
        // SAFETY: plain library call
        unsafe { mix::Mix_Pause(channel) }
    }

    fn resume(channel: i32) {
        // SAFETY: plain library call
        unsafe { mix::Mix_Resume(channel) }
    }

    fn unregister_all_effects(channel: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_UnregisterAllEffects(channel) }
    }

    fn set_panning(channel: i32, left: u8, right: u8) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_SetPanning(channel, left, right) }
    }

    fn set_position(channel: i32, angle: i16, distance: u8) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_SetPosition(channel, angle, distance) }
    }

    fn set_distance(channel: i32, distance: u8) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_SetDistance(channel, distance) }
    }

    fn set_reverse_stereo(channel: i32, flip: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_SetReverseStereo(channel, flip) }
    }

    fn reserve_channels(count: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_ReserveChannels(count) }
    }

    fn group_channel(channel: i32, tag: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_GroupChannel(channel, tag) }
    }

    fn group_channels(from: i32, to: i32, tag: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_GroupChannels(from, to, tag) }
    }

    fn group_available(tag: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_GroupAvailable(tag) }
    }

    fn group_count(tag: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_GroupCount(tag) }
    }

    fn group_oldest(tag: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_GroupOldest(tag) }
    }

    fn group_newer(tag: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_GroupNewer(tag) }
    }

    fn halt_group(tag: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_HaltGroup(tag) }
    }

    fn fade_out_group(tag: i32, ms: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_FadeOutGroup(tag, ms) }
    }

    fn load_mus(path: &str) -> *mut Self::Music {
        let path = c_string(path);
        // SAFETY: C strings outlive the call
        unsafe { mix::Mix_LoadMUS(path.as_ptr()) }
    }

    fn num_music_decoders() -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_GetNumMusicDecoders() }
    }

    fn music_decoder(index: i32) -> Option<String> {
        // SAFETY: the native string is NUL-terminated or null
        unsafe { from_c(mix::Mix_GetMusicDecoder(index)) }
    }

    fn has_music_decoder(name: &str) -> bool {
        let name = c_string(name);
        // SAFETY: C strings outlive the call
        is_true(unsafe { mix::Mix_HasMusicDecoder(name.as_ptr()) })
    }

    fn play_music(music: NonNull<Self::Music>, loops: i32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { mix::Mix_PlayMusic(music.as_ptr(), loops) }
    }

    fn fade_in_music(music: NonNull<Self::Music>, loops: i32, ms: i32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { mix::Mix_FadeInMusic(music.as_ptr(), loops, ms) }
    }

    fn fade_in_music_pos(music: NonNull<Self::Music>, loops: i32, ms: i32, position: f64) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { mix::Mix_FadeInMusicPos(music.as_ptr(), loops, ms, position) }
    }

    fn music_type(music: Option<NonNull<Self::Music>>) -> i32 {
        let music = music.map_or(std::ptr::null(), |m| m.as_ptr().cast_const());
        // SAFETY: live handles owned by wrappers
        unsafe { mix::Mix_GetMusicType(music) as i32 }
    }

    fn volume_music(volume: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_VolumeMusic(volume) }
    }

    fn halt_music() -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_HaltMusic() }
    }

    fn fade_out_music(ms: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_FadeOutMusic(ms) }
    }

    fn fading_music() -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_FadingMusic() as i32 }
    }

    fn pause_music() {
        // SAFETY: plain library call
        unsafe { mix::Mix_PauseMusic() }
    }

    fn resume_music() {
        // SAFETY: plain library call
        unsafe { mix::Mix_ResumeMusic() }
    }

    fn rewind_music() {
        // SAFETY: plain library call
        unsafe { mix::Mix_RewindMusic() }
    }

    fn paused_music() -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_PausedMusic() }
    }

    fn playing_music() -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_PlayingMusic() }
    }

    fn set_music_position(position: f64) -> i32 {
        // SAFETY: plain library call
        unsafe { mix::Mix_SetMusicPosition(position) }
    }

    fn set_music_cmd(command: Option<&str>) -> i32 {
        let command = c_string_opt(command);
        // SAFETY: C strings outlive the call
        unsafe { mix::Mix_SetMusicCMD(c_ptr(command.as_ref())) }
    }
}
