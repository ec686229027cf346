use anyhow::{anyhow, Result};
use atmono_core::constants::ANALYSER_FFT_SIZE;
use web_sys as web;

/// Output side of the audio graph: device node -> master gain ->
/// destination, with an analyser tapped off the device for the scope.
pub struct AudioGraph {
    pub ctx: web::AudioContext,
    pub master_gain: web::GainNode,
    pub analyser: web::AnalyserNode,
}

impl AudioGraph {
    pub fn new() -> Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow!("AudioContext: {:?}", e))?;

        // Overall loudness lives in the device's `vol` parameter; this gain
        // stays at unity and only shapes the graph.
        let master_gain =
            web::GainNode::new(&ctx).map_err(|e| anyhow!("GainNode: {:?}", e))?;
        master_gain
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| anyhow!("connect: {:?}", e))?;

        let analyser =
            web::AnalyserNode::new(&ctx).map_err(|e| anyhow!("AnalyserNode: {:?}", e))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);

        Ok(Self {
            ctx,
            master_gain,
            analyser,
        })
    }

    pub fn connect_device(&self, node: &web::AudioNode) -> Result<()> {
        node.connect_with_audio_node(&self.master_gain)
            .map_err(|e| anyhow!("connect device: {:?}", e))?;
        // Scope tap; the analyser is a sink, nothing downstream.
        node.connect_with_audio_node(&self.analyser)
            .map_err(|e| anyhow!("connect analyser: {:?}", e))?;
        Ok(())
    }

    /// Browsers start contexts suspended until a user gesture.
    pub fn resume(&self) {
        if let Ok(p) = self.ctx.resume() {
            let _ = p;
        }
    }
}
