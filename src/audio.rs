//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and a looping bass line; no external files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Food eaten
    Eat,
    /// Powerup collected
    Powerup,
    /// Poison touched
    Poison,
    /// Snake died
    Death,
}

/// Bass line notes (Hz), one per beat
const MUSIC_NOTES: [f32; 8] = [110.0, 110.0, 164.8, 146.8, 110.0, 130.8, 146.8, 98.0];
/// Seconds per beat
const MUSIC_BEAT: f64 = 0.25;
/// How far ahead notes are scheduled (seconds)
const MUSIC_LOOKAHEAD: f64 = 4.0;

/// Nodes of the running background track
struct MusicTrack {
    bass: OscillatorNode,
    lfo: OscillatorNode,
    gain: GainNode,
    /// Audio-clock time up to which notes are scheduled
    scheduled_until: f64,
    /// Next note index into `MUSIC_NOTES`
    next_note: usize,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music: Option<MusicTrack>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            music: None,
        }
    }

    /// Apply volume and mute preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.set_muted(settings.muted);
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_music();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn music_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Eat => self.play_eat(ctx, vol),
            SoundEffect::Powerup => self.play_powerup(ctx, vol),
            SoundEffect::Poison => self.play_poison(ctx, vol),
            SoundEffect::Death => self.play_death(ctx, vol),
        }
    }

    // === Music ===

    pub fn is_music_playing(&self) -> bool {
        self.music.is_some()
    }

    /// Start the background loop; no-op if already playing
    pub fn play_music(&mut self) {
        if self.music.is_some() {
            return;
        }
        let level = self.music_level();
        if level <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some(track) = start_track(ctx, level) else {
            log::warn!("Failed to start background music");
            return;
        };
        self.music = Some(track);
        self.update_music();
        log::debug!("Music started");
    }

    /// Keep the loop scheduled ahead of the audio clock; call once per frame
    pub fn update_music(&mut self) {
        let (Some(ctx), Some(track)) = (&self.ctx, self.music.as_mut()) else {
            return;
        };
        let horizon = ctx.current_time() + MUSIC_LOOKAHEAD;
        let freq = track.bass.frequency();
        while track.scheduled_until < horizon {
            let note = MUSIC_NOTES[track.next_note % MUSIC_NOTES.len()];
            freq.set_value_at_time(note, track.scheduled_until).ok();
            track.scheduled_until += MUSIC_BEAT;
            track.next_note = (track.next_note + 1) % MUSIC_NOTES.len();
        }
    }

    /// Stop the background loop; safe to call repeatedly
    pub fn stop_music(&mut self) {
        let Some(track) = self.music.take() else {
            return;
        };
        if let Some(ctx) = &self.ctx {
            let t = ctx.current_time();
            track.gain.gain().cancel_scheduled_values(t).ok();
            track.gain.gain().set_value_at_time(0.0, t).ok();
        }
        track.bass.stop().ok();
        track.lfo.stop().ok();
        track.gain.disconnect().ok();
        log::debug!("Music stopped");
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        create_osc(ctx, freq, osc_type)
    }

    /// Eat - quick rising blip
    fn play_eat(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 500.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(500.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(900.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.12).ok();
    }

    /// Powerup - happy arpeggio
    fn play_powerup(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [600.0, 800.0, 1000.0, 1200.0].iter().enumerate() {
            let delay = i as f64 * 0.06;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Poison - low sour buzz
    fn play_poison(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 90.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(90.0, t).ok();
            osc.frequency().set_value_at_time(85.0, t + 0.1).ok();
            osc.frequency().set_value_at_time(70.0, t + 0.2).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }

        // Detuned partner for the beating effect
        if let Some((osc, gain)) = self.create_osc(ctx, 95.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }
    }

    /// Death - sad descending
    fn play_death(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}

impl Drop for AudioManager {
    fn drop(&mut self) {
        self.stop_music();
    }
}

fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

/// Bass oscillator with a slow tremolo LFO on its gain
fn start_track(ctx: &AudioContext, level: f32) -> Option<MusicTrack> {
    let (bass, gain) = create_osc(ctx, MUSIC_NOTES[0], OscillatorType::Triangle)?;
    gain.gain().set_value(level * 0.15);

    let lfo = ctx.create_oscillator().ok()?;
    let depth = ctx.create_gain().ok()?;
    lfo.set_type(OscillatorType::Sine);
    lfo.frequency().set_value((1.0 / MUSIC_BEAT) as f32);
    depth.gain().set_value(level * 0.08);
    lfo.connect_with_audio_node(&depth).ok()?;
    depth.connect_with_audio_param(&gain.gain()).ok()?;

    bass.start().ok()?;
    lfo.start().ok()?;

    Some(MusicTrack {
        bass,
        lfo,
        gain,
        scheduled_until: ctx.current_time(),
        next_note: 0,
    })
}
